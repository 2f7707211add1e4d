//! Resource handles and lifecycle
//!
//! Every engine object handed to a script lives in a [`Resources`] registry
//! and is addressed by an opaque [`Handle`]. The registry answers three
//! questions on every boundary call:
//!
//! - does this handle still refer to something (generation check)?
//! - is that something of the kind the call expects (exact type, then
//!   declared ancestors)?
//! - has it been used recently enough to stay alive (liveness timer)?
//!
//! Scripts never release what they create, so collection is driven by idle
//! time: a resource not used for `keep_alive_frames` heartbeats is destroyed.
//! Resources attached to a context live as long as that context instead.
//!
//! Lightweight views into a parent resource (viewports, draw lists) have no
//! slot of their own. They are reached through a [`ResourceProxy`], which
//! folds a small [`Tag`] into the parent's handle.

pub mod error;
pub mod handle;
pub mod proxy;
pub mod registry;
pub mod timer;

#[cfg(test)]
mod tests;

pub use error::ResourceError;
pub use handle::{Handle, Tag};
pub use proxy::{Accessor, ResourceProxy};
pub use registry::{HeartbeatReport, Resources};
pub use timer::{LivenessTimer, TimerState};

use std::any::{Any, TypeId};

/// Object-safe access to [`Any`] for resource trait objects
pub trait AsAny: Any {
    /// Borrow as [`Any`]
    fn as_any(&self) -> &dyn Any;
    /// Mutably borrow as [`Any`]
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Compile-time identity of a kind a handle can be validated against
pub trait ResourceKind: 'static {
    /// Name shown to script callers in error messages
    const TYPE_NAME: &'static str;
}

/// Universal kind: matches any live resource regardless of its type
pub enum AnyResource {}

impl ResourceKind for AnyResource {
    const TYPE_NAME: &'static str = "UI_Resource";
}

/// An engine object whose lifetime is managed by [`Resources`]
pub trait Resource: AsAny {
    /// Kind-specific validity beyond the object's own existence.
    ///
    /// Once this returns `false` the registry latches the result: the
    /// resource is treated as invalid from then on and collected at the
    /// next heartbeat.
    fn is_valid(&self, _resources: &Resources) -> bool {
        true
    }

    /// Whether this resource may be attached to `owner`
    fn attachable(&self, _owner: &dyn Resource) -> bool {
        false
    }

    /// View of an ancestor kind embedded in this resource.
    ///
    /// Kinds built by composition return their embedded parent here so
    /// that handles validate as the parent kind too.
    fn ancestor(&self, _kind: TypeId) -> Option<&dyn Any> {
        None
    }

    /// Mutable counterpart of [`Resource::ancestor`]
    fn ancestor_mut(&mut self, _kind: TypeId) -> Option<&mut dyn Any> {
        None
    }
}
