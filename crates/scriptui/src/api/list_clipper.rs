//! List clipper operations

use super::Api;
use crate::resource::{Handle, ResourceError};
use crate::ui::{Context, ListClipper};

impl Api {
    /// Create a clipper bound to `ctx`
    pub fn create_list_clipper(&mut self, ctx: Handle) -> Result<Handle, ResourceError> {
        assert_valid!(self.resources, Context, ctx);
        self.resources.insert(ListClipper::new(ctx))
    }

    /// Start clipping `items_count` rows of `items_height` pixels in the
    /// current window of the clipper's context
    pub fn list_clipper_begin(&mut self, clipper: Handle, items_count: i32, items_height: f32) -> Result<(), ResourceError> {
        assert_valid!(self.resources, ListClipper, clipper);
        let items_count = usize::try_from(items_count)
            .map_err(|_| ResourceError::InvalidArgument(format!("invalid item count {items_count}")))?;

        let ctx = self.resources.get::<ListClipper>(clipper)?.context();
        let context = self.resources.get_mut::<Context>(ctx)?;
        let visible_height = context.window_viewport().work_size.y;
        let scroll_y = context.scroll_y();

        self.resources
            .get_mut::<ListClipper>(clipper)?
            .begin(items_count, items_height, visible_height, scroll_y)
    }

    /// Advance the clipper; `true` while there are rows to submit
    pub fn list_clipper_step(&mut self, clipper: Handle) -> Result<bool, ResourceError> {
        Ok(self.resources.get_mut::<ListClipper>(clipper)?.step())
    }

    /// Stop clipping
    pub fn list_clipper_end(&mut self, clipper: Handle) -> Result<(), ResourceError> {
        self.resources.get_mut::<ListClipper>(clipper)?.end();
        Ok(())
    }

    /// Rows to submit for the current step as `(start, end)`
    pub fn list_clipper_get_display_range(&mut self, clipper: Handle) -> Result<(usize, usize), ResourceError> {
        Ok(self.resources.get::<ListClipper>(clipper)?.display_range())
    }
}
