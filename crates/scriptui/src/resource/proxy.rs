//! Tagged-handle proxies
//!
//! A proxy names a sub-object that lives inside a base resource and is
//! reachable through one of several accessors, e.g. "the main viewport" or
//! "the current window's viewport" of a context. The proxy handle is the
//! base handle with the accessor's [`Tag`] folded in, so scripts hold a single
//! number and the accessor is picked when the handle is used.
//!
//! The sub-object is looked up on every call and never cached: what "the
//! window viewport" points at may change from one frame to the next.
//!
//! Tags within one proxy must be distinct. Resolution walks the accessors in
//! declared order and stops at the first one whose decoded base is live, so a
//! duplicated tag is simply shadowed by the earlier accessor.

use super::handle::Tag;
use super::{Resource, ResourceKind};

/// One way of reaching a proxy's target from its base resource
pub struct Accessor<B: 'static, T: ?Sized + 'static> {
    /// Tag folded into handles produced for this accessor
    pub tag: Tag,
    /// Name used in diagnostics
    pub name: &'static str,
    /// Produce the sub-object from the base resource
    pub get: fn(&mut B) -> &mut T,
}

/// A kind of sub-object reached through tagged handles
pub trait ResourceProxy: 'static {
    /// Name shown to script callers in error messages
    const TYPE_NAME: &'static str;

    /// Resource owning the sub-objects
    type Base: Resource + ResourceKind;

    /// Sub-object type produced by the accessors
    type Target: ?Sized + 'static;

    /// Accessors in resolution order
    const ACCESSORS: &'static [Accessor<Self::Base, Self::Target>];

    /// Accessor registered for `tag`
    fn accessor(tag: Tag) -> Option<&'static Accessor<Self::Base, Self::Target>> {
        Self::ACCESSORS.iter().find(|accessor| accessor.tag == tag)
    }
}
