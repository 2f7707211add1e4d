//! Script-facing boundary
//!
//! Every operation a script can call goes through [`Api`]. Each one
//! validates the handles it receives before touching the object behind
//! them; a failed check returns [`ResourceError::InvalidHandle`] and the
//! operation does nothing else. Successful access counts as use and keeps
//! the resource alive.
//!
//! Operations are grouped per object kind in the submodules.

use crate::core::config::ResourceConfig;
use crate::resource::{AnyResource, Handle, HeartbeatReport, ResourceError, ResourceKind, ResourceProxy, Resources, Tag};
use crate::ui::{Context, DrawListProxy, Font, Function, ListClipper, TextFilter, ViewportProxy};

/// Return `InvalidHandle` from the enclosing function unless `$handle` is a
/// live resource of kind `$kind`
macro_rules! assert_valid {
    ($resources:expr, $kind:ty, $handle:expr) => {
        if !$resources.is_valid::<$kind>($handle) {
            return Err($crate::resource::ResourceError::invalid(
                <$kind as $crate::resource::ResourceKind>::TYPE_NAME,
                $handle,
            ));
        }
    };
}

mod context;
mod draw_list;
mod font;
mod function;
mod list_clipper;
mod text_filter;
mod viewport;

type Validator = fn(&Resources, Handle) -> bool;

/// Validators by caller-facing kind name
const VALIDATORS: &[(&str, Validator)] = &[
    (<AnyResource as ResourceKind>::TYPE_NAME, Resources::is_valid::<AnyResource>),
    (<Context as ResourceKind>::TYPE_NAME, Resources::is_valid::<Context>),
    (<Font as ResourceKind>::TYPE_NAME, Resources::is_valid::<Font>),
    (<TextFilter as ResourceKind>::TYPE_NAME, Resources::is_valid::<TextFilter>),
    (<Function as ResourceKind>::TYPE_NAME, Resources::is_valid::<Function>),
    (<ListClipper as ResourceKind>::TYPE_NAME, Resources::is_valid::<ListClipper>),
    (<ViewportProxy as ResourceProxy>::TYPE_NAME, Resources::proxy_is_valid::<ViewportProxy>),
    (<DrawListProxy as ResourceProxy>::TYPE_NAME, Resources::proxy_is_valid::<DrawListProxy>),
];

/// Boundary between script callers and engine objects
pub struct Api {
    resources: Resources,
}

impl Api {
    /// Create a boundary over an empty registry
    pub fn new(config: ResourceConfig) -> Self {
        Self {
            resources: Resources::new(config),
        }
    }

    /// Underlying registry
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Mutable underlying registry, for the engine's per-frame work
    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    /// Whether `handle` is a live resource of kind `T`
    pub fn is_valid<T: ResourceKind>(&self, handle: Handle) -> bool {
        self.resources.is_valid::<T>(handle)
    }

    /// Validate a handle against a caller-facing kind name such as
    /// `"UI_Font"`. Unknown names are never valid.
    pub fn validate_ptr(&self, handle: Handle, type_name: &str) -> bool {
        VALIDATORS
            .iter()
            .find(|(name, _)| *name == type_name)
            .is_some_and(|(_, validate)| validate(&self.resources, handle))
    }

    /// Derive a proxy handle from `base`. Counts as a use of the base.
    fn proxy<P: ResourceProxy>(&mut self, base: Handle, tag: Tag) -> Result<Handle, ResourceError> {
        let handle = self.resources.encode::<P>(base, tag)?;
        self.resources.keep_alive(base);
        Ok(handle)
    }

    /// Destroy a resource and everything attached to it
    pub fn destroy(&mut self, handle: Handle) -> Result<(), ResourceError> {
        assert_valid!(self.resources, AnyResource, handle);
        self.resources.destroy(handle);
        Ok(())
    }

    /// Destroy every resource. Called at shutdown; safe to repeat.
    pub fn destroy_all(&mut self) -> usize {
        self.resources.destroy_all()
    }

    /// Advance one frame of idle collection
    pub fn heartbeat(&mut self) -> HeartbeatReport {
        self.resources.heartbeat()
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new(ResourceConfig::default())
    }
}
