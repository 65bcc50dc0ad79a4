//! lock::guard
//!
//! Scoped holder of a scroll lock.
//!
//! The guard is released automatically when dropped (RAII pattern), so a
//! view torn down by an early return or a panic still gives back its share
//! of the count.

use std::fmt;

use super::ScrollLock;
use crate::core::state::{Acquired, Released};
use crate::core::types::Generation;
use crate::surface::ScrollSurface;

/// One holder's share of a [`ScrollLock`].
///
/// # Example
///
/// ```
/// use scrollgate::lock::ScrollLock;
///
/// let lock: ScrollLock = ScrollLock::default();
/// {
///     let _guard = lock.hold();
///     assert!(lock.is_held());
/// }
/// assert!(!lock.is_held());
/// ```
#[must_use = "dropping the guard releases the lock immediately"]
pub struct ScrollLockGuard<S: ScrollSurface> {
    lock: ScrollLock<S>,
    /// Generation the share was taken in.
    generation: Generation,
    acquired: Acquired,
    /// Cleared once the share has been given back.
    active: bool,
}

impl<S: ScrollSurface> ScrollLockGuard<S> {
    pub(super) fn new(lock: ScrollLock<S>, generation: Generation, acquired: Acquired) -> Self {
        Self {
            lock,
            generation,
            acquired,
            active: true,
        }
    }

    /// What the acquire behind this guard did.
    pub fn acquired(&self) -> Acquired {
        self.acquired
    }

    /// Generation the guard acquired in.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether the guard still owns a share of the count.
    ///
    /// False once the lock has been force released (or otherwise returned
    /// to idle) since this guard acquired.
    pub fn is_current(&self) -> bool {
        self.active && self.lock.generation() == self.generation
    }

    /// The lock this guard belongs to.
    pub fn lock(&self) -> &ScrollLock<S> {
        &self.lock
    }

    /// Release explicitly.
    ///
    /// Returns `None` if the guard was orphaned by a force release.
    pub fn release(mut self) -> Option<Released> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> Option<Released> {
        if !std::mem::replace(&mut self.active, false) {
            return None;
        }
        self.lock.release_from(self.generation)
    }
}

impl<S: ScrollSurface> Drop for ScrollLockGuard<S> {
    fn drop(&mut self) {
        self.release_inner();
    }
}

impl<S: ScrollSurface> fmt::Debug for ScrollLockGuard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLockGuard")
            .field("generation", &self.generation)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
