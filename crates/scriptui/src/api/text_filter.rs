//! Text filter operations

use super::Api;
use crate::resource::{Handle, ResourceError};
use crate::ui::TextFilter;

impl Api {
    /// Create a filter, optionally with initial text
    pub fn create_text_filter(&mut self, default_filter: &str) -> Result<Handle, ResourceError> {
        self.resources.insert(TextFilter::new(default_filter))
    }

    /// Replace the filter text
    pub fn text_filter_set(&mut self, filter: Handle, text: &str) -> Result<(), ResourceError> {
        self.resources.get_mut::<TextFilter>(filter)?.set(text);
        Ok(())
    }

    /// Current filter text
    pub fn text_filter_get(&mut self, filter: Handle) -> Result<&str, ResourceError> {
        Ok(self.resources.get::<TextFilter>(filter)?.get())
    }

    /// Whether `text` passes the filter
    pub fn text_filter_pass_filter(&mut self, filter: Handle, text: &str) -> Result<bool, ResourceError> {
        Ok(self.resources.get::<TextFilter>(filter)?.pass_filter(text))
    }

    /// Reset to the empty filter
    pub fn text_filter_clear(&mut self, filter: Handle) -> Result<(), ResourceError> {
        self.resources.get_mut::<TextFilter>(filter)?.clear();
        Ok(())
    }

    /// Whether any term is set
    pub fn text_filter_is_active(&mut self, filter: Handle) -> Result<bool, ResourceError> {
        Ok(self.resources.get::<TextFilter>(filter)?.is_active())
    }
}
