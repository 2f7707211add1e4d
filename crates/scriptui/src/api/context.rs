//! Context operations

use super::Api;
use crate::foundation::math::Vec2;
use crate::resource::{AnyResource, Handle, ResourceError};
use crate::ui::{Context, ContextFlags, Viewport};

impl Api {
    /// Create a UI context
    pub fn create_context(&mut self, label: &str, flags: ContextFlags) -> Result<Handle, ResourceError> {
        let handle = self.resources.insert(Context::new(label, flags))?;
        log::info!("Created context '{}' ({})", label, handle);
        Ok(handle)
    }

    /// Label given at creation
    pub fn context_label(&mut self, ctx: Handle) -> Result<&str, ResourceError> {
        Ok(self.resources.get::<Context>(ctx)?.label())
    }

    /// Tie `obj`'s lifetime to `ctx`: it is no longer collected when idle
    /// and is destroyed together with the context
    pub fn attach(&mut self, ctx: Handle, obj: Handle) -> Result<(), ResourceError> {
        self.resources.attach::<Context, AnyResource>(ctx, obj)
    }

    /// Undo [`Api::attach`]
    pub fn detach(&mut self, ctx: Handle, obj: Handle) -> Result<(), ResourceError> {
        self.resources.detach::<Context, AnyResource>(ctx, obj)
    }

    /// Register a platform viewport; returns its index
    pub fn add_viewport(&mut self, ctx: Handle, pos: Vec2, size: Vec2) -> Result<usize, ResourceError> {
        let context = self.resources.get_mut::<Context>(ctx)?;
        Ok(context.add_viewport(Viewport::new(pos, size)))
    }

    /// Register a platform viewport whose work area excludes menu or status
    /// bars; returns its index
    pub fn add_viewport_with_work_area(
        &mut self,
        ctx: Handle,
        pos: Vec2,
        size: Vec2,
        work_pos: Vec2,
        work_size: Vec2,
    ) -> Result<usize, ResourceError> {
        let context = self.resources.get_mut::<Context>(ctx)?;
        Ok(context.add_viewport(Viewport::new(pos, size).with_work_area(work_pos, work_size)))
    }

    /// Select the viewport the current window is drawn into
    pub fn set_window_viewport(&mut self, ctx: Handle, index: usize) -> Result<(), ResourceError> {
        self.resources.get_mut::<Context>(ctx)?.set_window_viewport(index)
    }

    /// Scroll the current window
    pub fn set_scroll_y(&mut self, ctx: Handle, scroll_y: f32) -> Result<(), ResourceError> {
        self.resources.get_mut::<Context>(ctx)?.set_scroll_y(scroll_y);
        Ok(())
    }

    /// The host closed the context's window
    pub fn close_context(&mut self, ctx: Handle) -> Result<(), ResourceError> {
        self.resources.get_mut::<Context>(ctx)?.close();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Api;
    use crate::foundation::math::Vec2;
    use crate::resource::{Handle, ResourceError};
    use crate::ui::{Context, ContextFlags, Font, FontFlags};

    #[test]
    fn test_context_label() {
        let mut api = Api::default();
        let ctx = api.create_context("My script", ContextFlags::NO_SAVED_SETTINGS).unwrap();
        assert_eq!(api.context_label(ctx).unwrap(), "My script");
    }

    #[test]
    fn test_null_context_is_rejected() {
        let mut api = Api::default();
        assert_eq!(
            api.context_label(Handle::NULL),
            Err(ResourceError::invalid("UI_Context", Handle::NULL))
        );
        assert!(api.set_window_viewport(Handle::NULL, 0).is_err());
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let mut api = Api::default();
        let font = api.create_font("serif", 12, 0).unwrap();
        assert_eq!(
            api.context_label(font).unwrap_err().to_string(),
            format!("expected a valid UI_Context*, got {font}")
        );
    }

    #[test]
    fn test_attach_and_detach() {
        let mut api = Api::default();
        let ctx = api.create_context("test", ContextFlags::empty()).unwrap();
        let font = api.create_font("monospace", 14, FontFlags::BOLD.bits()).unwrap();
        let other = api.create_context("other", ContextFlags::empty()).unwrap();

        api.attach(ctx, font).unwrap();
        assert_eq!(api.resources().owner_of(font), Some(ctx));
        assert!(matches!(
            api.attach(other, font),
            Err(ResourceError::AlreadyAttached { .. })
        ));
        assert!(matches!(
            api.attach(ctx, other),
            Err(ResourceError::NotAttachable { kind: "UI_Context", owner: "UI_Context" })
        ));

        api.detach(ctx, font).unwrap();
        assert_eq!(api.resources().owner_of(font), None);
        assert!(api.detach(ctx, font).is_err());
        assert!(api.is_valid::<Font>(font));
    }

    #[test]
    fn test_viewports() {
        let mut api = Api::default();
        let ctx = api.create_context("test", ContextFlags::DOCKING_ENABLE).unwrap();
        let index = api.add_viewport(ctx, Vec2::new(50.0, 50.0), Vec2::new(400.0, 300.0)).unwrap();
        assert_eq!(index, 1);
        api.set_window_viewport(ctx, index).unwrap();
        assert!(api.set_window_viewport(ctx, 2).is_err());

        let window = api.get_window_viewport(ctx).unwrap();
        assert_eq!(api.viewport_get_pos(window).unwrap(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_closed_context_stops_validating() {
        let mut api = Api::default();
        let ctx = api.create_context("test", ContextFlags::empty()).unwrap();
        api.close_context(ctx).unwrap();
        assert!(!api.is_valid::<Context>(ctx));
        assert!(api.close_context(ctx).is_err());
    }
}
