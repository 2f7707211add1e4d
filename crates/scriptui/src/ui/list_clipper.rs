//! List clipper
//!
//! Computes which rows of a long, evenly spaced list are visible so scripts
//! only submit those. A clipper is bound to the context it was created for
//! and stops being valid as soon as that context does.

use super::context::Context;
use crate::resource::{Handle, Resource, ResourceError, ResourceKind, Resources};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Begun,
    Stepping,
}

/// Visible-range helper for long lists
#[derive(Debug, Clone)]
pub struct ListClipper {
    context: Handle,
    phase: Phase,
    items_count: usize,
    display_start: usize,
    display_end: usize,
}

impl ListClipper {
    /// Create a clipper for the context behind `context`
    pub fn new(context: Handle) -> Self {
        Self {
            context,
            phase: Phase::Idle,
            items_count: 0,
            display_start: 0,
            display_end: 0,
        }
    }

    /// Context this clipper belongs to
    pub fn context(&self) -> Handle {
        self.context
    }

    /// Start clipping `items_count` rows of `items_height` pixels inside a
    /// region `visible_height` pixels tall, scrolled by `scroll_y`.
    ///
    /// A non-positive `items_height` displays every row.
    pub fn begin(
        &mut self,
        items_count: usize,
        items_height: f32,
        visible_height: f32,
        scroll_y: f32,
    ) -> Result<(), ResourceError> {
        if self.phase != Phase::Idle {
            return Err(ResourceError::InvalidArgument(
                "list clipper already begun, call end first".to_string(),
            ));
        }

        self.items_count = items_count;
        if items_height > 0.0 {
            let first = (scroll_y.max(0.0) / items_height).floor() as usize;
            // Tiny heights overflow to infinity, which casts to usize::MAX
            let rows = ((visible_height.max(0.0) / items_height).ceil() as usize).saturating_add(1);
            self.display_start = first.min(items_count);
            self.display_end = first.saturating_add(rows).min(items_count);
        } else {
            self.display_start = 0;
            self.display_end = items_count;
        }
        self.phase = Phase::Begun;
        Ok(())
    }

    /// Advance the clipper. Returns `true` while there is a range to submit.
    pub fn step(&mut self) -> bool {
        match self.phase {
            Phase::Begun if self.display_start < self.display_end => {
                self.phase = Phase::Stepping;
                true
            }
            Phase::Begun | Phase::Stepping => {
                self.end();
                false
            }
            Phase::Idle => false,
        }
    }

    /// Stop clipping; safe to call at any time
    pub fn end(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Rows to submit for the current step, `start..end`
    pub fn display_range(&self) -> (usize, usize) {
        (self.display_start, self.display_end)
    }

    /// Row count given to [`ListClipper::begin`]
    pub fn items_count(&self) -> usize {
        self.items_count
    }
}

impl Resource for ListClipper {
    fn is_valid(&self, resources: &Resources) -> bool {
        resources.is_valid::<Context>(self.context)
    }
}

impl ResourceKind for ListClipper {
    const TYPE_NAME: &'static str = "UI_ListClipper";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range() {
        let mut clipper = ListClipper::new(Handle::NULL);
        clipper.begin(1000, 20.0, 100.0, 0.0).unwrap();
        assert!(clipper.step());
        assert_eq!(clipper.display_range(), (0, 6));
        assert!(!clipper.step());
    }

    #[test]
    fn test_scrolled_range_is_clamped() {
        let mut clipper = ListClipper::new(Handle::NULL);
        clipper.begin(10, 10.0, 50.0, 80.0).unwrap();
        assert!(clipper.step());
        assert_eq!(clipper.display_range(), (8, 10));
    }

    #[test]
    fn test_unknown_height_shows_everything() {
        let mut clipper = ListClipper::new(Handle::NULL);
        clipper.begin(42, -1.0, 100.0, 0.0).unwrap();
        assert!(clipper.step());
        assert_eq!(clipper.display_range(), (0, 42));
    }

    #[test]
    fn test_tiny_item_height_shows_everything() {
        let mut clipper = ListClipper::new(Handle::NULL);
        clipper.begin(10, f32::MIN_POSITIVE, 720.0, 0.0).unwrap();
        assert!(clipper.step());
        assert_eq!(clipper.display_range(), (0, 10));
    }

    #[test]
    fn test_empty_list_never_steps() {
        let mut clipper = ListClipper::new(Handle::NULL);
        clipper.begin(0, 10.0, 100.0, 0.0).unwrap();
        assert!(!clipper.step());
    }

    #[test]
    fn test_begin_twice_requires_end() {
        let mut clipper = ListClipper::new(Handle::NULL);
        clipper.begin(5, 10.0, 100.0, 0.0).unwrap();
        assert!(clipper.begin(5, 10.0, 100.0, 0.0).is_err());
        clipper.end();
        assert!(clipper.begin(5, 10.0, 100.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_without_context() {
        let resources = Resources::default();
        let clipper = ListClipper::new(Handle::NULL);
        assert!(!Resource::is_valid(&clipper, &resources));
    }
}
