//! Draw lists and the draw list proxy
//!
//! Commands are recorded per frame and cleared by [`Context::end_frame`].
//! Tags continue where [`ViewportProxy`](super::ViewportProxy) stops so a
//! viewport handle never decodes as a draw list and vice versa.

use super::context::Context;
use crate::foundation::math::{Color, Vec2};
use crate::resource::{Accessor, ResourceProxy, Tag};

/// A recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Straight line segment
    Line {
        /// Start point
        p1: Vec2,
        /// End point
        p2: Vec2,
        /// Packed color
        color: Color,
        /// Stroke width
        thickness: f32,
    },
    /// Axis-aligned rectangle
    Rect {
        /// Top-left corner
        min: Vec2,
        /// Bottom-right corner
        max: Vec2,
        /// Packed color
        color: Color,
        /// Corner radius
        rounding: f32,
        /// Stroke width, ignored when filled
        thickness: f32,
        /// Fill instead of stroke
        filled: bool,
    },
    /// Text run
    Text {
        /// Top-left of the first glyph
        pos: Vec2,
        /// Packed color
        color: Color,
        /// UTF-8 text
        text: String,
    },
}

/// Per-frame list of draw commands
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Record a line
    pub fn add_line(&mut self, p1: Vec2, p2: Vec2, color: Color, thickness: f32) {
        self.commands.push(DrawCommand::Line {
            p1,
            p2,
            color,
            thickness,
        });
    }

    /// Record a stroked rectangle
    pub fn add_rect(&mut self, min: Vec2, max: Vec2, color: Color, rounding: f32, thickness: f32) {
        self.commands.push(DrawCommand::Rect {
            min,
            max,
            color,
            rounding,
            thickness,
            filled: false,
        });
    }

    /// Record a filled rectangle
    pub fn add_rect_filled(&mut self, min: Vec2, max: Vec2, color: Color, rounding: f32) {
        self.commands.push(DrawCommand::Rect {
            min,
            max,
            color,
            rounding,
            thickness: 0.0,
            filled: true,
        });
    }

    /// Record a text run. Empty text records nothing.
    pub fn add_text(&mut self, pos: Vec2, color: Color, text: &str) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            pos,
            color,
            text: text.to_owned(),
        });
    }

    /// Recorded commands in submission order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing was recorded this frame
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every command
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Draw lists reached through a context handle
pub struct DrawListProxy;

impl DrawListProxy {
    /// Current window's draw list
    pub const WINDOW: Tag = Tag::new(3);
    /// Drawn over every window
    pub const FOREGROUND: Tag = Tag::new(4);
    /// Drawn under every window
    pub const BACKGROUND: Tag = Tag::new(5);
}

impl ResourceProxy for DrawListProxy {
    const TYPE_NAME: &'static str = "UI_DrawList";
    type Base = Context;
    type Target = DrawList;
    const ACCESSORS: &'static [Accessor<Context, DrawList>] = &[
        Accessor {
            tag: Self::WINDOW,
            name: "window",
            get: Context::window_draw_list,
        },
        Accessor {
            tag: Self::FOREGROUND,
            name: "foreground",
            get: Context::foreground_draw_list,
        },
        Accessor {
            tag: Self::BACKGROUND,
            name: "background",
            get: Context::background_draw_list,
        },
    ];
}
