//! Font descriptors
//!
//! A font resource only describes what to load. The host builds the atlas
//! once the font is attached to a context.

use super::context::Context;
use crate::resource::{Resource, ResourceError, ResourceKind};
use bitflags::bitflags;
use std::fmt;
use std::path::PathBuf;

bitflags! {
    /// Font style and collection index
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FontFlags: u32 {
        /// Face index when loading from a collection file
        const INDEX_MASK = 0xFF;
        /// Bold style
        const BOLD = 1 << 8;
        /// Italic style
        const ITALIC = 1 << 9;
    }
}

impl FontFlags {
    /// Style bits without the collection index
    pub fn style(self) -> FontFlags {
        self.difference(FontFlags::INDEX_MASK)
    }

    /// Face index within a collection file
    pub fn collection_index(self) -> u8 {
        (self.bits() & FontFlags::INDEX_MASK.bits()) as u8
    }
}

/// Generic font families resolved through the system font list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericFamily {
    /// `sans-serif`
    SansSerif,
    /// `serif`
    Serif,
    /// `monospace`
    Monospace,
    /// `cursive`
    Cursive,
    /// `fantasy`
    Fantasy,
}

impl GenericFamily {
    /// Every generic family
    pub const ALL: [GenericFamily; 5] = [
        GenericFamily::SansSerif,
        GenericFamily::Serif,
        GenericFamily::Monospace,
        GenericFamily::Cursive,
        GenericFamily::Fantasy,
    ];

    /// Name scripts use for this family
    pub fn name(self) -> &'static str {
        match self {
            GenericFamily::SansSerif => "sans-serif",
            GenericFamily::Serif => "serif",
            GenericFamily::Monospace => "monospace",
            GenericFamily::Cursive => "cursive",
            GenericFamily::Fantasy => "fantasy",
        }
    }

    /// Match a family name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for GenericFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the font data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// One of the generic families
    Generic(GenericFamily),
    /// A font file on disk
    File(PathBuf),
}

/// Font descriptor
#[derive(Debug, Clone)]
pub struct Font {
    family: String,
    source: FontSource,
    size: u32,
    flags: FontFlags,
}

impl Font {
    /// Describe a font by family name (or file path), pixel size and flags
    pub fn new(family: &str, size: u32, flags: FontFlags) -> Result<Self, ResourceError> {
        let family = family.trim();
        if family.is_empty() {
            return Err(ResourceError::InvalidArgument("font family is empty".to_string()));
        }
        if size == 0 {
            return Err(ResourceError::InvalidArgument("font size must be positive".to_string()));
        }

        let source = GenericFamily::from_name(family)
            .map_or_else(|| FontSource::File(PathBuf::from(family)), FontSource::Generic);
        Ok(Self {
            family: family.to_owned(),
            source,
            size,
            flags,
        })
    }

    /// Family name or file path as given
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Resolved source
    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Size in pixels
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Flags as given
    pub fn flags(&self) -> FontFlags {
        self.flags
    }

    /// Styles the host must synthesize because the source lacks them.
    ///
    /// Generic families pick a matching face from the system; a file is a
    /// single face.
    pub fn missing_styles(&self) -> FontFlags {
        match self.source {
            FontSource::Generic(_) => FontFlags::empty(),
            FontSource::File(_) => self.flags.style(),
        }
    }
}

impl Resource for Font {
    fn attachable(&self, owner: &dyn Resource) -> bool {
        owner.as_any().is::<Context>()
    }
}

impl ResourceKind for Font {
    const TYPE_NAME: &'static str = "UI_Font";
}
