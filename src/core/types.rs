//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ScrollOffset`] - Vertical page scroll position in pixels
//! - [`Generation`] - Epoch of a scroll lock, advanced on every return to idle
//! - [`HolderId`] - Validated label for an overlay that holds the lock
//!
//! # Validation
//!
//! `HolderId` enforces validity at construction time, so scripts and
//! callers cannot register an overlay under an unprintable or empty name.
//!
//! # Examples
//!
//! ```
//! use scrollgate::core::types::{HolderId, ScrollOffset};
//!
//! let id = HolderId::new("cart-drawer").unwrap();
//! assert_eq!(id.as_str(), "cart-drawer");
//!
//! let offset = ScrollOffset::new(120);
//! assert_eq!(offset.as_px(), 120);
//!
//! assert!(HolderId::new("").is_err());
//! assert!(HolderId::new("has space").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of a holder id.
pub const MAX_HOLDER_ID_LEN: usize = 64;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid holder id: {0}")]
    InvalidHolderId(String),
}

/// Vertical scroll position of the page, in pixels.
///
/// Signed because some platforms report negative offsets during overscroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScrollOffset(i64);

impl ScrollOffset {
    /// The top of the page.
    pub const TOP: ScrollOffset = ScrollOffset(0);

    /// Create an offset from a pixel value.
    pub const fn new(px: i64) -> Self {
        Self(px)
    }

    /// The offset in pixels.
    pub const fn as_px(self) -> i64 {
        self.0
    }

    /// Clamp into `[0, max]`.
    pub fn clamp_to(self, max: ScrollOffset) -> Self {
        Self(self.0.clamp(0, max.0.max(0)))
    }

    /// Offset moved by `delta` pixels, saturating at the i64 bounds.
    pub fn saturating_add(self, delta: i64) -> Self {
        Self(self.0.saturating_add(delta))
    }
}

impl From<i64> for ScrollOffset {
    fn from(px: i64) -> Self {
        Self(px)
    }
}

impl fmt::Display for ScrollOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

/// Epoch of a scroll lock.
///
/// The generation advances every time the lock returns to idle. A guard
/// remembers the generation it acquired in; once the generation moves on,
/// the guard no longer owns a share of the count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// The generation of a freshly constructed lock.
    pub const INITIAL: Generation = Generation(0);

    /// The following generation.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw epoch number.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// A validated overlay identifier.
///
/// Holder ids must be:
/// - Non-empty and at most [`MAX_HOLDER_ID_LEN`] characters
/// - ASCII alphanumerics, `-`, `_`, `.` or `:`
///
/// # Example
///
/// ```
/// use scrollgate::core::types::HolderId;
///
/// assert!(HolderId::new("checkout:address-sheet").is_ok());
/// assert!(HolderId::new("size_guide.v2").is_ok());
/// assert!(HolderId::new("bad/id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HolderId(String);

impl HolderId {
    /// Create a new holder id, validating it.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidHolderId` if the id is empty, too long,
    /// or contains a disallowed character.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        if id.is_empty() {
            return Err(TypeError::InvalidHolderId("cannot be empty".into()));
        }
        if id.len() > MAX_HOLDER_ID_LEN {
            return Err(TypeError::InvalidHolderId(format!(
                "'{}...' exceeds {} characters",
                id.chars().take(16).collect::<String>(),
                MAX_HOLDER_ID_LEN
            )));
        }
        if let Some(c) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')))
        {
            return Err(TypeError::InvalidHolderId(format!(
                "'{}' contains disallowed character {:?}",
                id, c
            )));
        }
        Ok(())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HolderId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HolderId> for String {
    fn from(id: HolderId) -> Self {
        id.0
    }
}

impl AsRef<str> for HolderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
