//! Proxy handle resolution
//!
//! Uses a small base resource whose accessors count their calls, so the
//! tests can see exactly which accessor a proxy handle went through.

use crate::core::config::ResourceConfig;
use crate::resource::handle::MAX_SAFE_HANDLE;
use crate::resource::{Accessor, Handle, Resource, ResourceError, ResourceKind, ResourceProxy, Resources, Tag};

#[derive(Default)]
struct Panel {
    left: i32,
    right: i32,
    left_calls: u32,
    right_calls: u32,
}

impl Panel {
    fn left(&mut self) -> &mut i32 {
        self.left_calls += 1;
        &mut self.left
    }

    fn right(&mut self) -> &mut i32 {
        self.right_calls += 1;
        &mut self.right
    }
}

impl Resource for Panel {}

impl ResourceKind for Panel {
    const TYPE_NAME: &'static str = "Panel";
}

struct Other;

impl Resource for Other {}

impl ResourceKind for Other {
    const TYPE_NAME: &'static str = "Other";
}

const LEFT: Tag = Tag::new(1);
const RIGHT: Tag = Tag::new(2);

struct SideProxy;

impl ResourceProxy for SideProxy {
    const TYPE_NAME: &'static str = "Side";
    type Base = Panel;
    type Target = i32;
    const ACCESSORS: &'static [Accessor<Panel, i32>] = &[
        Accessor { tag: LEFT, name: "left", get: Panel::left },
        Accessor { tag: RIGHT, name: "right", get: Panel::right },
    ];
}

/// Registers the same tag twice
struct ShadowedProxy;

impl ResourceProxy for ShadowedProxy {
    const TYPE_NAME: &'static str = "Shadowed";
    type Base = Panel;
    type Target = i32;
    const ACCESSORS: &'static [Accessor<Panel, i32>] = &[
        Accessor { tag: LEFT, name: "first", get: Panel::left },
        Accessor { tag: LEFT, name: "second", get: Panel::right },
    ];
}

fn calls(resources: &Resources, panel: Handle) -> (u32, u32) {
    let panel = resources.peek::<Panel>(panel).unwrap();
    (panel.left_calls, panel.right_calls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_tag_reaches_its_accessor() {
        let mut resources = Resources::default();
        let panel = resources.insert(Panel { left: 1, right: 2, ..Panel::default() }).unwrap();

        let left = resources.encode::<SideProxy>(panel, LEFT).unwrap();
        let right = resources.encode::<SideProxy>(panel, RIGHT).unwrap();
        assert_ne!(left, right);

        let (base, value) = resources.resolve::<SideProxy>(right).unwrap();
        assert_eq!(*value, 2);
        assert_eq!(base, panel);
        assert_eq!(calls(&resources, panel), (0, 1));

        let (_, value) = resources.resolve::<SideProxy>(left).unwrap();
        *value = 10;
        assert_eq!(calls(&resources, panel), (1, 1));
        assert_eq!(resources.peek::<Panel>(panel).unwrap().left, 10);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let mut resources = Resources::default();
        let panel = resources.insert(Panel::default()).unwrap();
        let right = resources.encode::<SideProxy>(panel, RIGHT).unwrap();

        for _ in 0..5 {
            resources.resolve::<SideProxy>(right).unwrap();
        }
        assert_eq!(calls(&resources, panel), (0, 5));
    }

    #[test]
    fn test_first_registered_accessor_wins() {
        let mut resources = Resources::default();
        let panel = resources.insert(Panel::default()).unwrap();
        let handle = resources.encode::<ShadowedProxy>(panel, LEFT).unwrap();

        resources.resolve::<ShadowedProxy>(handle).unwrap();
        resources.resolve::<ShadowedProxy>(handle).unwrap();
        assert_eq!(calls(&resources, panel), (2, 0));
    }

    #[test]
    fn test_exhaustion_calls_no_accessor() {
        let mut resources = Resources::default();
        let panel = resources.insert(Panel::default()).unwrap();
        let other = resources.insert(Other).unwrap();

        // A handle carrying an unregistered tag
        let stray = panel.encode(Tag::new(7));
        let error = resources.resolve::<SideProxy>(stray).unwrap_err();
        assert_eq!(error, ResourceError::invalid("Side", stray));

        // A correctly tagged handle over the wrong kind of base
        let wrong_base = other.encode(LEFT);
        assert!(resources.resolve::<SideProxy>(wrong_base).is_err());
        assert!(!resources.proxy_is_valid::<SideProxy>(wrong_base));

        // The direct handle itself is not a proxy handle
        assert!(resources.resolve::<SideProxy>(panel).is_err());

        assert_eq!(calls(&resources, panel), (0, 0));
    }

    #[test]
    fn test_null_is_never_a_proxy() {
        let mut resources = Resources::default();
        resources.insert(Panel::default()).unwrap();

        assert!(!resources.proxy_is_valid::<SideProxy>(Handle::NULL));
        assert!(resources.resolve::<SideProxy>(Handle::NULL).is_err());
        // Tag bits alone decode to null
        assert!(resources.resolve::<SideProxy>(Handle::from_raw(1)).is_err());
    }

    #[test]
    fn test_proxy_dies_with_base() {
        let mut resources = Resources::default();
        let panel = resources.insert(Panel::default()).unwrap();
        let left = resources.encode::<SideProxy>(panel, LEFT).unwrap();
        assert!(resources.proxy_is_valid::<SideProxy>(left));

        resources.destroy(panel);
        assert!(!resources.proxy_is_valid::<SideProxy>(left));
        assert_eq!(
            resources.resolve::<SideProxy>(left).unwrap_err().to_string(),
            format!("expected a valid Side*, got {left}")
        );
    }

    #[test]
    fn test_encode_checks_tag_and_base() {
        let mut resources = Resources::default();
        let panel = resources.insert(Panel::default()).unwrap();
        let other = resources.insert(Other).unwrap();

        assert_eq!(
            resources.encode::<SideProxy>(panel, Tag::new(3)),
            Err(ResourceError::UnknownTag { proxy: "Side", tag: 3 })
        );
        assert_eq!(
            resources.encode::<SideProxy>(other, LEFT),
            Err(ResourceError::invalid("Panel", other))
        );

        let left = resources.encode::<SideProxy>(panel, LEFT).unwrap();
        assert!(resources.encode::<SideProxy>(left, RIGHT).is_err());
    }

    #[test]
    fn test_resolve_keeps_base_alive() {
        let mut resources = Resources::new(ResourceConfig::default().with_keep_alive_frames(2));
        let panel = resources.insert(Panel::default()).unwrap();
        let left = resources.encode::<SideProxy>(panel, LEFT).unwrap();

        for _ in 0..10 {
            resources.heartbeat();
            resources.resolve::<SideProxy>(left).unwrap();
        }
        assert!(resources.is_valid::<Panel>(panel));
    }

    #[test]
    fn test_handles_fit_in_a_double() {
        let mut resources = Resources::default();
        let mut handles = Vec::new();
        for round in 0..4 {
            for _ in 0..64 {
                let panel = resources.insert(Panel::default()).unwrap();
                handles.push(panel);
                handles.push(resources.encode::<SideProxy>(panel, RIGHT).unwrap());
            }
            if round < 3 {
                resources.destroy_all();
            }
        }

        for handle in handles {
            assert!(handle.raw() < MAX_SAFE_HANDLE);
            assert_eq!(Handle::try_from(handle.to_f64()), Ok(handle));
        }
    }
}
