//! surface::traits
//!
//! Scroll surface trait definition.
//!
//! # Design
//!
//! `ScrollSurface` is the seam between the reference counter and whatever
//! owns the page. The counter decides *when* to engage and disengage;
//! the surface decides *how*.
//!
//! # Contract
//!
//! Implementations may assume:
//! - `engage` is only called while disengaged
//! - `disengage` is only called while engaged
//!
//! Only [`crate::lock::ScrollLock`] calls `engage` and `disengage`. Other
//! code may read the position or scroll while the surface is disengaged.

use crate::core::types::ScrollOffset;

/// A page whose background scrolling can be suppressed.
pub trait ScrollSurface {
    /// Current vertical scroll offset.
    fn scroll_position(&self) -> ScrollOffset;

    /// Suppress background scrolling, pinning the page at `saved`.
    fn engage(&mut self, saved: ScrollOffset);

    /// Revert the engage effect.
    fn disengage(&mut self);

    /// Move the page to `offset`. Used to restore the saved position.
    fn scroll_to(&mut self, offset: ScrollOffset);
}

impl<S: ScrollSurface + ?Sized> ScrollSurface for Box<S> {
    fn scroll_position(&self) -> ScrollOffset {
        (**self).scroll_position()
    }

    fn engage(&mut self, saved: ScrollOffset) {
        (**self).engage(saved)
    }

    fn disengage(&mut self) {
        (**self).disengage()
    }

    fn scroll_to(&mut self, offset: ScrollOffset) {
        (**self).scroll_to(offset)
    }
}
