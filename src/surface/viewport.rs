//! surface::viewport
//!
//! In-memory model of a scrollable page.
//!
//! # Model
//!
//! The page has a document scroll offset (`scroll_y`, bounded by
//! `max_scroll`) and the handful of body style properties the lock writes.
//! Engaging pins the body:
//!
//! ```text
//! position: fixed; top: -<saved>px; overflow: hidden; width: 100%
//! ```
//!
//! With the body fixed the document can no longer scroll, so `scroll_y`
//! reads 0 while the content stays visually where it was (the negative
//! `top` compensates). Disengaging clears the styles; the document is then
//! back at the top until the saved offset is restored.

use serde::Serialize;

use super::traits::ScrollSurface;
use crate::core::types::ScrollOffset;

/// CSS `position` values the lock uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Fixed,
}

/// CSS `overflow` values the lock uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    Hidden,
}

/// Inline body style written by the engage effect.
///
/// `None` means the property is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BodyStyle {
    pub position: Option<Position>,
    pub top: Option<i64>,
    pub overflow: Option<Overflow>,
    pub full_width: bool,
}

impl BodyStyle {
    /// Style that pins the page at `saved`.
    pub fn pinned(saved: ScrollOffset) -> Self {
        Self {
            position: Some(Position::Fixed),
            top: Some(-saved.as_px()),
            overflow: Some(Overflow::Hidden),
            full_width: true,
        }
    }

    /// Whether the body is currently pinned.
    pub fn is_pinned(&self) -> bool {
        self.position == Some(Position::Fixed)
    }
}

/// A scrollable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    scroll_y: ScrollOffset,
    max_scroll: ScrollOffset,
    body: BodyStyle,
}

impl Viewport {
    /// A page scrolled to `initial`, scrollable up to `max_scroll`.
    pub fn new(initial: ScrollOffset, max_scroll: ScrollOffset) -> Self {
        Self {
            scroll_y: initial.clamp_to(max_scroll),
            max_scroll,
            body: BodyStyle::default(),
        }
    }

    /// Current body style.
    pub fn body(&self) -> &BodyStyle {
        &self.body
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> ScrollOffset {
        self.max_scroll
    }

    /// Offset of the content the user sees, pinned or not.
    pub fn visual_offset(&self) -> ScrollOffset {
        match self.body.top {
            Some(top) if self.body.is_pinned() => ScrollOffset::new(-top),
            _ => self.scroll_y,
        }
    }

    /// User scroll by `delta` pixels. Ignored while the body is pinned.
    ///
    /// Returns `true` if the page moved.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        if self.body.is_pinned() {
            return false;
        }
        let before = self.scroll_y;
        self.scroll_y = self.scroll_y.saturating_add(delta).clamp_to(self.max_scroll);
        self.scroll_y != before
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ScrollOffset::TOP, ScrollOffset::new(i64::MAX))
    }
}

impl ScrollSurface for Viewport {
    fn scroll_position(&self) -> ScrollOffset {
        self.scroll_y
    }

    fn engage(&mut self, saved: ScrollOffset) {
        self.body = BodyStyle::pinned(saved);
        self.scroll_y = ScrollOffset::TOP;
    }

    fn disengage(&mut self) {
        self.body = BodyStyle::default();
    }

    fn scroll_to(&mut self, offset: ScrollOffset) {
        if !self.body.is_pinned() {
            self.scroll_y = offset.clamp_to(self.max_scroll);
        }
    }
}
