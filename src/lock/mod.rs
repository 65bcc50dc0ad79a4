//! lock
//!
//! Reference-counted scroll lock.
//!
//! # Architecture
//!
//! Several independent views (modals, bottom sheets) may want background
//! scrolling suppressed at the same time, and their open/close lifecycles
//! interleave freely. [`ScrollLock`] counts holders and is the only thing
//! that engages or disengages its [`ScrollSurface`]:
//!
//! - The surface is engaged once, when the count goes 0 -> 1
//! - It is disengaged once, when the count returns to 0
//! - The scroll offset captured at 0 -> 1 is restored on the way back
//!
//! A lock is an explicitly constructed handle, not a global. Clones share
//! the same state, so the UI layer can hand a clone to every view that
//! needs one while tests build as many independent locks as they like.
//!
//! # Invariants
//!
//! - Every operation is total: nothing returns an error or panics in
//!   release builds
//! - Excess releases are absorbed and counted in [`LockStats`]
//! - [`ScrollLock::force_release`] always leaves the lock idle
//! - A [`ScrollLockGuard`] releases exactly once, and never after the lock
//!   has been reset underneath it
//!
//! # Threading
//!
//! All calls happen on one UI thread. The lock is built on `Rc<RefCell<..>>`
//! and is neither `Send` nor `Sync`.
//!
//! # Example
//!
//! ```
//! use scrollgate::core::types::ScrollOffset;
//! use scrollgate::lock::ScrollLock;
//! use scrollgate::surface::{ScrollSurface, Viewport};
//!
//! let lock = ScrollLock::new(Viewport::new(ScrollOffset::new(120), ScrollOffset::new(2000)));
//!
//! let cart = lock.hold();
//! let size_guide = lock.hold();
//! assert_eq!(lock.count(), 2);
//!
//! drop(cart);
//! assert!(lock.is_held());
//!
//! drop(size_guide);
//! assert!(!lock.is_held());
//! assert_eq!(lock.with_surface(|v| v.scroll_position()), ScrollOffset::new(120));
//! ```

mod guard;

pub use guard::ScrollLockGuard;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::core::config::{Config, ExcessReleasePolicy};
use crate::core::state::{Acquired, ForceReleased, LockState, Released};
use crate::core::types::{Generation, ScrollOffset};
use crate::surface::{ScrollSurface, Viewport};

/// Behaviour switches for a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOptions {
    /// Diagnostic for releases while idle.
    pub excess_release: ExcessReleasePolicy,
    /// Scroll back to the saved offset after disengaging.
    pub restore_scroll: bool,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            excess_release: ExcessReleasePolicy::Warn,
            restore_scroll: true,
        }
    }
}

impl From<&Config> for LockOptions {
    fn from(config: &Config) -> Self {
        Self {
            excess_release: config.excess_release(),
            restore_scroll: config.restore_scroll(),
        }
    }
}

/// Lifetime counters for one lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LockStats {
    /// Idle -> Held transitions.
    pub engagements: u64,
    /// Held -> Idle transitions, forced or not.
    pub disengagements: u64,
    /// Releases that arrived while idle.
    pub absorbed_releases: u64,
    /// Calls to `force_release`, including ones made while idle.
    pub force_releases: u64,
    /// Holders dropped by `force_release`.
    pub orphaned_holders: u64,
}

/// Reference-counted gate around a scroll surface.
pub struct ScrollLock<S: ScrollSurface = Viewport> {
    inner: Rc<RefCell<LockInner<S>>>,
}

struct LockInner<S> {
    state: LockState,
    surface: S,
    options: LockOptions,
    stats: LockStats,
}

impl<S: ScrollSurface> ScrollLock<S> {
    /// An idle lock over `surface` with default options.
    pub fn new(surface: S) -> Self {
        Self::with_options(surface, LockOptions::default())
    }

    /// An idle lock over `surface`.
    pub fn with_options(surface: S, options: LockOptions) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LockInner {
                state: LockState::new(),
                surface,
                options,
                stats: LockStats::default(),
            })),
        }
    }

    /// Register a holder.
    ///
    /// On the 0 -> 1 edge the current scroll offset is saved and the
    /// surface is engaged. Later acquires only bump the count.
    pub fn acquire(&self) -> Acquired {
        let mut inner = self.inner.borrow_mut();
        let current = inner.surface.scroll_position();
        let outcome = inner.state.acquire(current);
        if let Acquired::Engaged { saved } = outcome {
            inner.surface.engage(saved);
            inner.stats.engagements += 1;
            tracing::debug!(saved = saved.as_px(), "scroll lock engaged");
        }
        outcome
    }

    /// Drop a holder.
    ///
    /// When the last holder leaves, the surface is disengaged and the
    /// saved offset restored. Releasing an idle lock changes nothing.
    pub fn release(&self) -> Released {
        let (outcome, policy) = {
            let mut inner = self.inner.borrow_mut();
            let outcome = inner.state.release();
            match outcome {
                Released::Disengaged { saved } => inner.disengage(saved),
                Released::Absorbed => inner.stats.absorbed_releases += 1,
                Released::Left { .. } => {}
            }
            (outcome, inner.options.excess_release)
        };

        if outcome == Released::Absorbed {
            report_excess_release(policy);
        }
        outcome
    }

    /// Reset to idle regardless of how many holders remain.
    ///
    /// Any outstanding guards become orphaned: dropping them later does
    /// nothing. Forcing an idle lock leaves the surface untouched.
    pub fn force_release(&self) -> ForceReleased {
        let mut inner = self.inner.borrow_mut();
        let outcome = inner.state.force_release();
        inner.stats.force_releases += 1;
        if let Some(saved) = outcome.saved {
            inner.stats.orphaned_holders += outcome.orphaned as u64;
            inner.disengage(saved);
            tracing::debug!(orphaned = outcome.orphaned, "scroll lock force released");
        }
        outcome
    }

    /// Acquire and return a guard that releases on drop.
    pub fn hold(&self) -> ScrollLockGuard<S> {
        let acquired = self.acquire();
        let generation = self.generation();
        ScrollLockGuard::new(self.clone(), generation, acquired)
    }

    /// Release on behalf of a holder that acquired in `generation`.
    ///
    /// Returns `None` without touching the count if the lock has returned
    /// to idle since then.
    pub(crate) fn release_from(&self, generation: Generation) -> Option<Released> {
        if self.generation() == generation {
            Some(self.release())
        } else {
            tracing::debug!(%generation, "ignoring release from orphaned holder");
            None
        }
    }

    /// Number of active holders.
    pub fn count(&self) -> usize {
        self.inner.borrow().state.count()
    }

    /// Whether the surface is engaged.
    pub fn is_held(&self) -> bool {
        self.inner.borrow().state.is_held()
    }

    /// Offset that will be restored when the lock disengages.
    pub fn saved_position(&self) -> Option<ScrollOffset> {
        self.inner.borrow().state.saved_position()
    }

    /// Current generation.
    pub fn generation(&self) -> Generation {
        self.inner.borrow().state.generation()
    }

    /// Snapshot of the lifetime counters.
    pub fn stats(&self) -> LockStats {
        self.inner.borrow().stats
    }

    /// Options the lock was built with.
    pub fn options(&self) -> LockOptions {
        self.inner.borrow().options
    }

    /// Read the surface.
    ///
    /// `f` must not call back into this lock.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.inner.borrow().surface)
    }

    /// Drive the surface, e.g. to simulate user scrolling.
    ///
    /// `f` must not call back into this lock, and must not call
    /// `engage`/`disengage` itself.
    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.inner.borrow_mut().surface)
    }

    /// Take the surface back if this is the last handle.
    ///
    /// Returns the lock unchanged while other handles or guards exist.
    pub fn try_into_surface(self) -> Result<S, Self> {
        match Rc::try_unwrap(self.inner) {
            Ok(cell) => Ok(cell.into_inner().surface),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl<S: ScrollSurface> LockInner<S> {
    fn disengage(&mut self, saved: ScrollOffset) {
        self.surface.disengage();
        if self.options.restore_scroll {
            self.surface.scroll_to(saved);
        }
        self.stats.disengagements += 1;
        tracing::debug!(restored = saved.as_px(), "scroll lock disengaged");
    }
}

fn report_excess_release(policy: ExcessReleasePolicy) {
    match policy {
        ExcessReleasePolicy::Ignore => {}
        ExcessReleasePolicy::Warn | ExcessReleasePolicy::Strict => {
            tracing::warn!("scroll lock released while idle; release absorbed");
        }
    }
    debug_assert!(
        policy != ExcessReleasePolicy::Strict,
        "scroll lock released more times than acquired"
    );
}

impl<S: ScrollSurface> Clone for ScrollLock<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: ScrollSurface> fmt::Debug for ScrollLock<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("ScrollLock")
                .field("state", &inner.state)
                .field("options", &inner.options)
                .finish_non_exhaustive(),
            Err(_) => f.write_str("ScrollLock { <borrowed> }"),
        }
    }
}

impl Default for ScrollLock<Viewport> {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
