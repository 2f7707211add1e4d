//! Resource errors surfaced to script callers

use super::handle::Handle;
use thiserror::Error;

/// Errors raised by the resource registry and the boundary layer
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResourceError {
    /// Null, stale, or wrong-kind handle.
    ///
    /// These cases are deliberately indistinguishable: a script cannot
    /// recover differently from any of them.
    #[error("expected a valid {expected}*, got {handle}")]
    InvalidHandle {
        /// Caller-facing name of the expected kind
        expected: &'static str,
        /// Raw handle received from the caller
        handle: Handle,
    },

    /// The arena produced a slot that does not fit the 53-bit handle layout
    #[error("handle space exhausted: slot {index} generation {generation} cannot be encoded")]
    HandleSpaceExhausted {
        /// Slot index that overflowed
        index: u64,
        /// Slot generation that overflowed
        generation: u64,
    },

    /// Configured resource limit reached
    #[error("too many resources: limit of {limit} reached")]
    LimitReached {
        /// Configured maximum
        limit: usize,
    },

    /// Encoding requested with a tag the proxy does not register
    #[error("{proxy} has no accessor for tag {tag}")]
    UnknownTag {
        /// Proxy type name
        proxy: &'static str,
        /// Offending tag bits
        tag: u8,
    },

    /// Resource kind cannot be attached to the requested owner
    #[error("{kind} cannot be attached to {owner}")]
    NotAttachable {
        /// Kind of the resource being attached
        kind: &'static str,
        /// Kind of the would-be owner
        owner: &'static str,
    },

    /// Resource is already attached to a different owner
    #[error("{kind} is already attached to another context")]
    AlreadyAttached {
        /// Kind of the resource being attached
        kind: &'static str,
    },

    /// Argument rejected by the engine object
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Value access on a callback program failed
    #[error("{0}")]
    Value(String),
}

impl ResourceError {
    /// Build the invalid-handle error for an expected kind
    pub fn invalid(expected: &'static str, handle: Handle) -> Self {
        Self::InvalidHandle { expected, handle }
    }
}
