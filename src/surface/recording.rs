//! surface::recording
//!
//! Recording surface for deterministic testing.
//!
//! # Design
//!
//! `RecordingSurface` keeps a plain scroll offset and logs every call the
//! lock makes. Clones share the log, so a test can hand one clone to a
//! [`crate::lock::ScrollLock`] and inspect the other.
//!
//! # Example
//!
//! ```
//! use scrollgate::core::types::ScrollOffset;
//! use scrollgate::lock::ScrollLock;
//! use scrollgate::surface::{RecordingSurface, SurfaceEvent};
//!
//! let surface = RecordingSurface::at(ScrollOffset::new(120));
//! let lock = ScrollLock::new(surface.clone());
//!
//! lock.acquire();
//! lock.release();
//!
//! assert_eq!(
//!     surface.events(),
//!     vec![
//!         SurfaceEvent::Engaged { at: ScrollOffset::new(120) },
//!         SurfaceEvent::Disengaged,
//!         SurfaceEvent::ScrolledTo { offset: ScrollOffset::new(120) },
//!     ]
//! );
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::traits::ScrollSurface;
use crate::core::types::ScrollOffset;

/// Recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Engaged { at: ScrollOffset },
    Disengaged,
    ScrolledTo { offset: ScrollOffset },
}

/// Surface that records calls. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    inner: Rc<RefCell<RecordingInner>>,
}

#[derive(Debug, Default)]
struct RecordingInner {
    position: ScrollOffset,
    engaged: bool,
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    /// A surface at the top of the page.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface scrolled to `position`.
    pub fn at(position: ScrollOffset) -> Self {
        let surface = Self::default();
        surface.inner.borrow_mut().position = position;
        surface
    }

    /// Simulate the user scrolling, without recording an event.
    pub fn set_position(&self, position: ScrollOffset) {
        self.inner.borrow_mut().position = position;
    }

    /// Whether the last call left the surface engaged.
    pub fn is_engaged(&self) -> bool {
        self.inner.borrow().engaged
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.inner.borrow().events.clone()
    }

    /// Number of `engage` calls.
    pub fn engage_count(&self) -> usize {
        self.count(|e| matches!(e, SurfaceEvent::Engaged { .. }))
    }

    /// Number of `disengage` calls.
    pub fn disengage_count(&self) -> usize {
        self.count(|e| matches!(e, SurfaceEvent::Disengaged))
    }

    /// The offset of the last restore, if any.
    pub fn last_restore(&self) -> Option<ScrollOffset> {
        self.inner.borrow().events.iter().rev().find_map(|e| match e {
            SurfaceEvent::ScrolledTo { offset } => Some(*offset),
            _ => None,
        })
    }

    /// Forget recorded events, keeping position and engaged flag.
    pub fn clear_events(&self) {
        self.inner.borrow_mut().events.clear();
    }

    fn count(&self, pred: impl Fn(&SurfaceEvent) -> bool) -> usize {
        self.inner.borrow().events.iter().filter(|e| pred(e)).count()
    }
}

impl ScrollSurface for RecordingSurface {
    fn scroll_position(&self) -> ScrollOffset {
        self.inner.borrow().position
    }

    fn engage(&mut self, saved: ScrollOffset) {
        let mut inner = self.inner.borrow_mut();
        inner.engaged = true;
        inner.events.push(SurfaceEvent::Engaged { at: saved });
    }

    fn disengage(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.engaged = false;
        inner.events.push(SurfaceEvent::Disengaged);
    }

    fn scroll_to(&mut self, offset: ScrollOffset) {
        let mut inner = self.inner.borrow_mut();
        inner.position = offset;
        inner.events.push(SurfaceEvent::ScrolledTo { offset });
    }
}
