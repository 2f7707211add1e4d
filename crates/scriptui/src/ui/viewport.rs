//! Viewports and the viewport proxy

use super::context::Context;
use crate::foundation::math::Vec2;
use crate::resource::{Accessor, ResourceProxy, Tag};

/// A platform window area the context draws into
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Top-left corner in screen coordinates
    pub pos: Vec2,
    /// Full size
    pub size: Vec2,
    /// Top-left corner of the area not covered by menu or status bars
    pub work_pos: Vec2,
    /// Size of the work area
    pub work_size: Vec2,
}

impl Viewport {
    /// Viewport whose work area covers all of it
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            work_pos: pos,
            work_size: size,
        }
    }

    /// Replace the work area
    pub fn with_work_area(mut self, work_pos: Vec2, work_size: Vec2) -> Self {
        self.work_pos = work_pos;
        self.work_size = work_size;
        self
    }

    /// Center of the full area
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Center of the work area
    pub fn work_center(&self) -> Vec2 {
        self.work_pos + self.work_size * 0.5
    }
}

/// Viewports reached through a context handle
pub struct ViewportProxy;

impl ViewportProxy {
    /// The host window's viewport
    pub const MAIN: Tag = Tag::new(1);
    /// Viewport of the window currently being drawn
    pub const WINDOW: Tag = Tag::new(2);
}

impl ResourceProxy for ViewportProxy {
    const TYPE_NAME: &'static str = "UI_Viewport";
    type Base = Context;
    type Target = Viewport;
    const ACCESSORS: &'static [Accessor<Context, Viewport>] = &[
        Accessor {
            tag: Self::MAIN,
            name: "main",
            get: Context::main_viewport,
        },
        Accessor {
            tag: Self::WINDOW,
            name: "window",
            get: Context::window_viewport,
        },
    ];
}
