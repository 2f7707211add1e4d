//! UI context
//!
//! A context is the root object a script creates before drawing anything.
//! It owns the viewports and draw lists that proxies hand out, and it is the
//! owner other resources attach to.

use super::draw_list::DrawList;
use super::viewport::Viewport;
use crate::foundation::math::Vec2;
use crate::resource::{Resource, ResourceError, ResourceKind, Resources};
use bitflags::bitflags;

bitflags! {
    /// Context creation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ContextFlags: u32 {
        /// Don't persist window positions and sizes
        const NO_SAVED_SETTINGS = 1 << 0;
        /// Ignore keyboard input
        const NO_KEYBOARD = 1 << 1;
        /// Allow windows to dock into the host's dockers
        const DOCKING_ENABLE = 1 << 2;
    }
}

/// Size of the main viewport of a new context
pub const DEFAULT_DISPLAY_SIZE: (f32, f32) = (1280.0, 720.0);

/// Top-level UI context
pub struct Context {
    label: String,
    flags: ContextFlags,
    /// Index 0 is the main viewport
    viewports: Vec<Viewport>,
    window_viewport: usize,
    window_draw_list: DrawList,
    foreground_draw_list: DrawList,
    background_draw_list: DrawList,
    /// Vertical scroll of the current window
    scroll_y: f32,
    closed: bool,
    frame_count: u64,
}

impl Context {
    /// Create a context with a single main viewport
    pub fn new(label: impl Into<String>, flags: ContextFlags) -> Self {
        let (width, height) = DEFAULT_DISPLAY_SIZE;
        Self {
            label: label.into(),
            flags,
            viewports: vec![Viewport::new(Vec2::zeros(), Vec2::new(width, height))],
            window_viewport: 0,
            window_draw_list: DrawList::default(),
            foreground_draw_list: DrawList::default(),
            background_draw_list: DrawList::default(),
            scroll_y: 0.0,
            closed: false,
            frame_count: 0,
        }
    }

    /// Label given at creation
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Creation flags
    pub fn flags(&self) -> ContextFlags {
        self.flags
    }

    /// Frames completed by this context
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Main (host window) viewport
    pub fn main_viewport(&mut self) -> &mut Viewport {
        &mut self.viewports[0]
    }

    /// Viewport of the window currently being drawn
    pub fn window_viewport(&mut self) -> &mut Viewport {
        &mut self.viewports[self.window_viewport]
    }

    /// Register a platform viewport and return its index
    pub fn add_viewport(&mut self, viewport: Viewport) -> usize {
        self.viewports.push(viewport);
        self.viewports.len() - 1
    }

    /// Number of viewports, main included
    pub fn viewport_count(&self) -> usize {
        self.viewports.len()
    }

    /// Make viewport `index` the current window's viewport
    pub fn set_window_viewport(&mut self, index: usize) -> Result<(), ResourceError> {
        if index >= self.viewports.len() {
            return Err(ResourceError::InvalidArgument(format!(
                "viewport index {index} out of range (0..{})",
                self.viewports.len()
            )));
        }
        self.window_viewport = index;
        Ok(())
    }

    /// Vertical scroll of the current window in pixels
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Scroll the current window. Negative values clamp to zero.
    pub fn set_scroll_y(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y.max(0.0);
    }

    /// Draw list of the window currently being drawn
    pub fn window_draw_list(&mut self) -> &mut DrawList {
        &mut self.window_draw_list
    }

    /// Draw list rendered over every window
    pub fn foreground_draw_list(&mut self) -> &mut DrawList {
        &mut self.foreground_draw_list
    }

    /// Draw list rendered under every window
    pub fn background_draw_list(&mut self) -> &mut DrawList {
        &mut self.background_draw_list
    }

    /// The host closed this context's platform window.
    ///
    /// The context becomes permanently invalid and is collected at the next
    /// heartbeat together with everything attached to it.
    pub fn close(&mut self) {
        log::debug!("Context '{}' closed", self.label);
        self.closed = true;
    }

    /// Whether [`Context::close`] was called
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Finish the frame: drop this frame's draw commands and go back to the
    /// main viewport
    pub fn end_frame(&mut self) {
        self.window_draw_list.clear();
        self.foreground_draw_list.clear();
        self.background_draw_list.clear();
        self.window_viewport = 0;
        self.frame_count += 1;
    }
}

impl Resource for Context {
    fn is_valid(&self, _resources: &Resources) -> bool {
        !self.closed
    }
}

impl ResourceKind for Context {
    const TYPE_NAME: &'static str = "UI_Context";
}
