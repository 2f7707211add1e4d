//! Draw list operations

use super::Api;
use crate::foundation::math::{Color, Vec2};
use crate::resource::{Handle, ResourceError};
use crate::ui::{DrawList, DrawListProxy};

impl Api {
    /// Handle of the current window's draw list
    pub fn get_window_draw_list(&mut self, ctx: Handle) -> Result<Handle, ResourceError> {
        self.proxy::<DrawListProxy>(ctx, DrawListProxy::WINDOW)
    }

    /// Handle of the draw list rendered over every window
    pub fn get_foreground_draw_list(&mut self, ctx: Handle) -> Result<Handle, ResourceError> {
        self.proxy::<DrawListProxy>(ctx, DrawListProxy::FOREGROUND)
    }

    /// Handle of the draw list rendered under every window
    pub fn get_background_draw_list(&mut self, ctx: Handle) -> Result<Handle, ResourceError> {
        self.proxy::<DrawListProxy>(ctx, DrawListProxy::BACKGROUND)
    }

    fn draw_list(&mut self, draw_list: Handle) -> Result<&mut DrawList, ResourceError> {
        let (_, draw_list) = self.resources.resolve::<DrawListProxy>(draw_list)?;
        Ok(draw_list)
    }

    /// Record a line
    pub fn draw_list_add_line(
        &mut self,
        draw_list: Handle,
        p1: Vec2,
        p2: Vec2,
        color: Color,
        thickness: f32,
    ) -> Result<(), ResourceError> {
        self.draw_list(draw_list)?.add_line(p1, p2, color, thickness);
        Ok(())
    }

    /// Record a stroked rectangle
    pub fn draw_list_add_rect(
        &mut self,
        draw_list: Handle,
        min: Vec2,
        max: Vec2,
        color: Color,
        rounding: f32,
        thickness: f32,
    ) -> Result<(), ResourceError> {
        self.draw_list(draw_list)?
            .add_rect(min, max, color, rounding, thickness);
        Ok(())
    }

    /// Record a filled rectangle
    pub fn draw_list_add_rect_filled(
        &mut self,
        draw_list: Handle,
        min: Vec2,
        max: Vec2,
        color: Color,
        rounding: f32,
    ) -> Result<(), ResourceError> {
        self.draw_list(draw_list)?
            .add_rect_filled(min, max, color, rounding);
        Ok(())
    }

    /// Record a text run
    pub fn draw_list_add_text(
        &mut self,
        draw_list: Handle,
        pos: Vec2,
        color: Color,
        text: &str,
    ) -> Result<(), ResourceError> {
        self.draw_list(draw_list)?.add_text(pos, color, text);
        Ok(())
    }

    /// Commands recorded so far this frame
    pub fn draw_list_command_count(&mut self, draw_list: Handle) -> Result<usize, ResourceError> {
        Ok(self.draw_list(draw_list)?.len())
    }
}
