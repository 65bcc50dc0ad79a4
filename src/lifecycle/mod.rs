//! lifecycle
//!
//! View lifecycle hooks that drive the scroll lock.
//!
//! # Overview
//!
//! - [`Overlay`] - A modal-like view. Opening takes a share of the lock,
//!   closing (or tearing the view down) gives it back.
//! - [`navigate`] - Backstop for full navigation: force releases the lock so
//!   the page can never be left pinned by a view that failed to close.
//!
//! Overlays hold a [`ScrollLockGuard`] rather than calling acquire/release
//! themselves, so an overlay that is dropped while open cannot leak a
//! holder.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::state::{Acquired, ForceReleased, Released};
use crate::core::types::HolderId;
use crate::lock::{ScrollLock, ScrollLockGuard};
use crate::surface::{ScrollSurface, Viewport};

/// What kind of view an overlay is. Purely descriptive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    #[default]
    Modal,
    BottomSheet,
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayKind::Modal => f.write_str("modal"),
            OverlayKind::BottomSheet => f.write_str("bottom sheet"),
        }
    }
}

/// A modal-like view bound to a scroll lock.
///
/// # Example
///
/// ```
/// use scrollgate::core::types::HolderId;
/// use scrollgate::lifecycle::{Overlay, OverlayKind};
/// use scrollgate::lock::ScrollLock;
///
/// let lock: ScrollLock = ScrollLock::default();
/// let mut cart = Overlay::new(HolderId::new("cart").unwrap(), OverlayKind::BottomSheet, &lock);
///
/// cart.open();
/// cart.open(); // already open: no second share
/// assert_eq!(lock.count(), 1);
///
/// cart.close();
/// assert!(!lock.is_held());
/// ```
pub struct Overlay<S: ScrollSurface = Viewport> {
    id: HolderId,
    kind: OverlayKind,
    lock: ScrollLock<S>,
    guard: Option<ScrollLockGuard<S>>,
}

impl<S: ScrollSurface> Overlay<S> {
    /// A closed overlay.
    pub fn new(id: HolderId, kind: OverlayKind, lock: &ScrollLock<S>) -> Self {
        Self {
            id,
            kind,
            lock: lock.clone(),
            guard: None,
        }
    }

    /// Overlay id.
    pub fn id(&self) -> &HolderId {
        &self.id
    }

    /// Overlay kind.
    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    /// Whether the overlay is open.
    ///
    /// An overlay stays open after a navigation reset; it just no longer
    /// holds the lock (see [`Overlay::holds_lock`]).
    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    /// Whether the overlay currently owns a share of the lock.
    pub fn holds_lock(&self) -> bool {
        self.guard.as_ref().is_some_and(|g| g.is_current())
    }

    /// Open the overlay. Returns `None` if it was already open.
    pub fn open(&mut self) -> Option<Acquired> {
        if self.guard.is_some() {
            return None;
        }
        let guard = self.lock.hold();
        let acquired = guard.acquired();
        tracing::debug!(overlay = %self.id, kind = %self.kind, "overlay opened");
        self.guard = Some(guard);
        Some(acquired)
    }

    /// Close the overlay. Returns `None` if it was closed, or if its share
    /// was already dropped by a navigation reset.
    pub fn close(&mut self) -> Option<Released> {
        let guard = self.guard.take()?;
        tracing::debug!(overlay = %self.id, "overlay closed");
        guard.release()
    }

    /// Follow a visibility flag, opening or closing as needed.
    pub fn set_open(&mut self, open: bool) {
        if open {
            self.open();
        } else {
            self.close();
        }
    }
}

impl<S: ScrollSurface> fmt::Debug for Overlay<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlay")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("open", &self.is_open())
            .finish()
    }
}

/// Navigation backstop: force the lock back to idle.
///
/// Open overlays keep their guards but no longer hold the lock; closing
/// them afterwards is harmless.
pub fn navigate<S: ScrollSurface>(lock: &ScrollLock<S>) -> ForceReleased {
    let forced = lock.force_release();
    if forced.orphaned > 0 {
        tracing::info!(orphaned = forced.orphaned, "navigation reset scroll lock");
    }
    forced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ScrollOffset;
    use crate::surface::RecordingSurface;

    fn id(s: &str) -> HolderId {
        HolderId::new(s).unwrap()
    }

    fn setup() -> (ScrollLock<RecordingSurface>, RecordingSurface) {
        let surface = RecordingSurface::at(ScrollOffset::new(200));
        (ScrollLock::new(surface.clone()), surface)
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let (lock, surface) = setup();
        let mut modal = Overlay::new(id("size-guide"), OverlayKind::Modal, &lock);

        assert!(modal.open().is_some());
        assert!(modal.open().is_none());
        assert_eq!(lock.count(), 1);

        assert!(modal.close().is_some());
        assert!(modal.close().is_none());
        assert_eq!(lock.count(), 0);
        assert_eq!(lock.stats().absorbed_releases, 0);
        assert_eq!(surface.engage_count(), 1);
        assert_eq!(surface.disengage_count(), 1);
    }

    #[test]
    fn overlapping_overlays_share_one_engagement() {
        let (lock, surface) = setup();
        let mut cart = Overlay::new(id("cart"), OverlayKind::BottomSheet, &lock);
        let mut confirm = Overlay::new(id("confirm"), OverlayKind::Modal, &lock);

        cart.open();
        confirm.open();
        cart.close();
        assert!(surface.is_engaged());

        confirm.close();
        assert!(!surface.is_engaged());
        assert_eq!(surface.engage_count(), 1);
        assert_eq!(surface.last_restore(), Some(ScrollOffset::new(200)));
    }

    #[test]
    fn dropping_open_overlay_releases() {
        let (lock, surface) = setup();
        {
            let mut sheet = Overlay::new(id("filters"), OverlayKind::BottomSheet, &lock);
            sheet.set_open(true);
            assert!(lock.is_held());
        }
        assert!(!lock.is_held());
        assert!(!surface.is_engaged());
    }

    #[test]
    fn navigate_orphans_open_overlays() {
        let (lock, surface) = setup();
        let mut cart = Overlay::new(id("cart"), OverlayKind::BottomSheet, &lock);
        let mut menu = Overlay::new(id("menu"), OverlayKind::Modal, &lock);
        cart.open();
        menu.open();

        let forced = navigate(&lock);
        assert_eq!(forced.orphaned, 2);
        assert!(!surface.is_engaged());
        assert!(cart.is_open());
        assert!(!cart.holds_lock());

        // A view on the new page opens before the stale ones close.
        let mut promo = Overlay::new(id("promo"), OverlayKind::Modal, &lock);
        promo.open();
        assert_eq!(cart.close(), None);
        menu.set_open(false);
        assert!(lock.is_held());
        assert!(promo.holds_lock());
        assert_eq!(surface.disengage_count(), 1);
    }

    #[test]
    fn navigate_while_idle_is_quiet() {
        let (lock, surface) = setup();
        assert_eq!(navigate(&lock).orphaned, 0);
        assert!(surface.events().is_empty());
    }

    #[test]
    fn kind_display_and_serde() {
        assert_eq!(OverlayKind::BottomSheet.to_string(), "bottom sheet");
        let kind: OverlayKind = serde_json::from_str("\"bottom_sheet\"").unwrap();
        assert_eq!(kind, OverlayKind::BottomSheet);
    }
}
