//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: scroll bounds must be
//! non-negative and the initial scroll must fit inside `max_scroll`.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// How the lock reports a release that arrives while nothing is held.
///
/// Behaviour never changes: the release is always absorbed. Only the
/// diagnostic differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcessReleasePolicy {
    /// Count it, say nothing.
    Ignore,
    /// Count it and emit a warning event.
    #[default]
    Warn,
    /// Warn, and trip a debug assertion in debug builds.
    Strict,
}

/// File configuration.
///
/// # Example
///
/// ```toml
/// [lock]
/// excess_release = "warn"
/// restore_scroll = true
///
/// [viewport]
/// initial_scroll = 0
/// max_scroll = 10000
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Lock behaviour
    pub lock: Option<LockSection>,

    /// Defaults for replayed viewports
    pub viewport: Option<ViewportSection>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(viewport) = &self.viewport {
            viewport.validate()?;
        }
        Ok(())
    }
}

/// `[lock]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LockSection {
    /// Diagnostic for releases while idle
    pub excess_release: Option<ExcessReleasePolicy>,

    /// Restore the saved scroll offset when the lock disengages
    pub restore_scroll: Option<bool>,
}

/// `[viewport]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportSection {
    /// Scroll offset a replay starts from
    pub initial_scroll: Option<i64>,

    /// Largest reachable scroll offset
    pub max_scroll: Option<i64>,
}

impl ViewportSection {
    /// Validate the viewport bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(max) = self.max_scroll {
            if max < 0 {
                return Err(ConfigError::InvalidValue(format!(
                    "viewport.max_scroll must be >= 0, got {}",
                    max
                )));
            }
        }
        if let Some(initial) = self.initial_scroll {
            if initial < 0 {
                return Err(ConfigError::InvalidValue(format!(
                    "viewport.initial_scroll must be >= 0, got {}",
                    initial
                )));
            }
            if let Some(max) = self.max_scroll {
                if initial > max {
                    return Err(ConfigError::InvalidValue(format!(
                        "viewport.initial_scroll ({}) exceeds max_scroll ({})",
                        initial, max
                    )));
                }
            }
        }
        Ok(())
    }
}
