//! Font operations

use super::Api;
use crate::resource::{Handle, ResourceError};
use crate::ui::{Font, FontFlags};

impl Api {
    /// Describe a font. `family` is a generic family name or a file path;
    /// `flags` combines style bits with a collection index.
    pub fn create_font(&mut self, family: &str, size: i32, flags: u32) -> Result<Handle, ResourceError> {
        let size = u32::try_from(size)
            .map_err(|_| ResourceError::InvalidArgument(format!("invalid font size {size}")))?;
        let font = Font::new(family, size, FontFlags::from_bits_retain(flags))?;
        self.resources.insert(font)
    }

    /// Family name or file path
    pub fn font_family(&mut self, font: Handle) -> Result<&str, ResourceError> {
        Ok(self.resources.get::<Font>(font)?.family())
    }

    /// Size in pixels
    pub fn font_size(&mut self, font: Handle) -> Result<u32, ResourceError> {
        Ok(self.resources.get::<Font>(font)?.size())
    }

    /// Flags given at creation
    pub fn font_flags(&mut self, font: Handle) -> Result<u32, ResourceError> {
        Ok(self.resources.get::<Font>(font)?.flags().bits())
    }
}
