//! Viewport operations
//!
//! Viewport handles are proxy handles derived from a context handle. They
//! stay usable for as long as the context does.

use super::Api;
use crate::foundation::math::Vec2;
use crate::resource::{Handle, ResourceError};
use crate::ui::{Viewport, ViewportProxy};

impl Api {
    /// Handle of the context's main viewport
    pub fn get_main_viewport(&mut self, ctx: Handle) -> Result<Handle, ResourceError> {
        self.proxy::<ViewportProxy>(ctx, ViewportProxy::MAIN)
    }

    /// Handle of the current window's viewport
    pub fn get_window_viewport(&mut self, ctx: Handle) -> Result<Handle, ResourceError> {
        self.proxy::<ViewportProxy>(ctx, ViewportProxy::WINDOW)
    }

    fn viewport(&mut self, viewport: Handle) -> Result<&Viewport, ResourceError> {
        let (_, viewport) = self.resources.resolve::<ViewportProxy>(viewport)?;
        Ok(&*viewport)
    }

    /// Top-left corner
    pub fn viewport_get_pos(&mut self, viewport: Handle) -> Result<Vec2, ResourceError> {
        Ok(self.viewport(viewport)?.pos)
    }

    /// Full size
    pub fn viewport_get_size(&mut self, viewport: Handle) -> Result<Vec2, ResourceError> {
        Ok(self.viewport(viewport)?.size)
    }

    /// Center of the full area
    pub fn viewport_get_center(&mut self, viewport: Handle) -> Result<Vec2, ResourceError> {
        Ok(self.viewport(viewport)?.center())
    }

    /// Top-left corner of the work area
    pub fn viewport_get_work_pos(&mut self, viewport: Handle) -> Result<Vec2, ResourceError> {
        Ok(self.viewport(viewport)?.work_pos)
    }

    /// Size of the work area
    pub fn viewport_get_work_size(&mut self, viewport: Handle) -> Result<Vec2, ResourceError> {
        Ok(self.viewport(viewport)?.work_size)
    }

    /// Center of the work area
    pub fn viewport_get_work_center(&mut self, viewport: Handle) -> Result<Vec2, ResourceError> {
        Ok(self.viewport(viewport)?.work_center())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Api;
    use crate::core::config::ResourceConfig;
    use crate::foundation::math::Vec2;
    use crate::resource::ResourceError;
    use crate::ui::ContextFlags;

    #[test]
    fn test_main_viewport_geometry() {
        let mut api = Api::default();
        let ctx = api.create_context("test", ContextFlags::empty()).unwrap();
        let main = api.get_main_viewport(ctx).unwrap();

        assert_eq!(api.viewport_get_pos(main).unwrap(), Vec2::zeros());
        assert_eq!(api.viewport_get_size(main).unwrap(), Vec2::new(1280.0, 720.0));
        assert_eq!(api.viewport_get_center(main).unwrap(), Vec2::new(640.0, 360.0));
        assert_eq!(api.viewport_get_work_size(main).unwrap(), Vec2::new(1280.0, 720.0));
        assert_eq!(api.viewport_get_work_pos(main).unwrap(), Vec2::zeros());
    }

    #[test]
    fn test_window_viewport_follows_context_state() {
        let mut api = Api::default();
        let ctx = api.create_context("test", ContextFlags::empty()).unwrap();
        let window = api.get_window_viewport(ctx).unwrap();
        let index = api.add_viewport(ctx, Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0)).unwrap();

        assert_eq!(api.viewport_get_pos(window).unwrap(), Vec2::zeros());
        api.set_window_viewport(ctx, index).unwrap();
        assert_eq!(api.viewport_get_pos(window).unwrap(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_viewport_work_area() {
        let mut api = Api::default();
        let ctx = api.create_context("test", ContextFlags::empty()).unwrap();
        let window = api.get_window_viewport(ctx).unwrap();
        let index = api
            .add_viewport_with_work_area(
                ctx,
                Vec2::new(100.0, 100.0),
                Vec2::new(800.0, 600.0),
                Vec2::new(100.0, 120.0),
                Vec2::new(800.0, 560.0),
            )
            .unwrap();
        api.set_window_viewport(ctx, index).unwrap();

        assert_eq!(api.viewport_get_center(window).unwrap(), Vec2::new(500.0, 400.0));
        assert_eq!(api.viewport_get_work_pos(window).unwrap(), Vec2::new(100.0, 120.0));
        assert_eq!(api.viewport_get_work_size(window).unwrap(), Vec2::new(800.0, 560.0));
        assert_eq!(api.viewport_get_work_center(window).unwrap(), Vec2::new(500.0, 400.0));

        let main = api.get_main_viewport(ctx).unwrap();
        assert_eq!(api.viewport_get_work_center(main).unwrap(), Vec2::new(640.0, 360.0));
    }

    #[test]
    fn test_viewport_of_expired_context() {
        let mut api = Api::new(ResourceConfig::default().with_keep_alive_frames(2));
        let ctx = api.create_context("test", ContextFlags::empty()).unwrap();
        let main = api.get_main_viewport(ctx).unwrap();
        api.heartbeat();
        api.heartbeat();

        assert_eq!(
            api.viewport_get_size(main),
            Err(ResourceError::invalid("UI_Viewport", main))
        );
        assert!(api.get_main_viewport(ctx).is_err());
    }

    #[test]
    fn test_context_handle_is_not_a_viewport() {
        let mut api = Api::default();
        let ctx = api.create_context("test", ContextFlags::empty()).unwrap();
        assert!(api.viewport_get_pos(ctx).is_err());
    }
}
