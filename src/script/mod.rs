//! script
//!
//! Replayable lifecycle scripts.
//!
//! # Format
//!
//! A script is a JSON document describing a page and the lifecycle events
//! that happen on it, in order:
//!
//! ```json
//! {
//!   "initial_scroll": 120,
//!   "max_scroll": 4000,
//!   "steps": [
//!     { "op": "open", "overlay": "cart", "kind": "bottom_sheet" },
//!     { "op": "open", "overlay": "confirm" },
//!     { "op": "close", "overlay": "cart" },
//!     { "op": "close", "overlay": "confirm" }
//!   ]
//! }
//! ```
//!
//! `initial_scroll` and `max_scroll` may be omitted; the configured
//! viewport defaults fill them in. See [`Step`] for every operation.
//!
//! [`Simulator`] runs a script against a [`crate::surface::Viewport`] and
//! records one [`TraceEntry`] per step.

mod simulator;

pub use simulator::{Effect, Replay, Simulator, TraceEntry};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{HolderId, ScrollOffset};
use crate::lifecycle::OverlayKind;

/// Errors from loading a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse script: {0}")]
    ParseError(String),

    #[error("invalid script: {0}")]
    Invalid(String),
}

/// One lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Open an overlay (no-op if it is already open).
    Open {
        overlay: HolderId,
        #[serde(default)]
        kind: OverlayKind,
    },
    /// Close an overlay (no-op if it is not open).
    Close { overlay: HolderId },
    /// Tear an overlay down without closing it first.
    Drop { overlay: HolderId },
    /// Jump the page to an offset. Ignored while pinned.
    Scroll { to: ScrollOffset },
    /// User scroll by a delta. Ignored while pinned.
    ScrollBy { delta: i64 },
    /// Full navigation: force release.
    Navigate,
    /// Raw acquire from a caller outside any overlay.
    Acquire,
    /// Raw release from a caller outside any overlay.
    Release,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Open { overlay, .. } => write!(f, "open {}", overlay),
            Step::Close { overlay } => write!(f, "close {}", overlay),
            Step::Drop { overlay } => write!(f, "drop {}", overlay),
            Step::Scroll { to } => write!(f, "scroll {}", to.as_px()),
            Step::ScrollBy { delta } => write!(f, "scroll_by {:+}", delta),
            Step::Navigate => f.write_str("navigate"),
            Step::Acquire => f.write_str("acquire"),
            Step::Release => f.write_str("release"),
        }
    }
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Starting page offset
    #[serde(default)]
    pub initial_scroll: Option<ScrollOffset>,

    /// Largest reachable page offset
    #[serde(default)]
    pub max_scroll: Option<ScrollOffset>,

    /// Events in order
    pub steps: Vec<Step>,
}

impl Script {
    /// Read and parse a script file.
    pub fn load(path: &Path) -> Result<Script, ScriptError> {
        let contents = fs::read_to_string(path).map_err(|e| ScriptError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents)
    }

    /// Parse and validate script JSON.
    pub fn parse(contents: &str) -> Result<Script, ScriptError> {
        let script: Script =
            serde_json::from_str(contents).map_err(|e| ScriptError::ParseError(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    /// Check page bounds.
    pub fn validate(&self) -> Result<(), ScriptError> {
        if let Some(max) = self.max_scroll {
            if max.as_px() < 0 {
                return Err(ScriptError::Invalid(format!(
                    "max_scroll must be >= 0, got {}",
                    max.as_px()
                )));
            }
        }
        if let Some(initial) = self.initial_scroll {
            if initial.as_px() < 0 {
                return Err(ScriptError::Invalid(format!(
                    "initial_scroll must be >= 0, got {}",
                    initial.as_px()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_ops() {
        let script = Script::parse(
            r#"{
                "initial_scroll": 10,
                "steps": [
                    { "op": "open", "overlay": "cart", "kind": "bottom_sheet" },
                    { "op": "open", "overlay": "menu" },
                    { "op": "close", "overlay": "cart" },
                    { "op": "drop", "overlay": "menu" },
                    { "op": "scroll", "to": 300 },
                    { "op": "scroll_by", "delta": -20 },
                    { "op": "navigate" },
                    { "op": "acquire" },
                    { "op": "release" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.initial_scroll, Some(ScrollOffset::new(10)));
        assert_eq!(script.max_scroll, None);
        assert_eq!(script.steps.len(), 9);
        assert_eq!(
            script.steps[1],
            Step::Open {
                overlay: HolderId::new("menu").unwrap(),
                kind: OverlayKind::Modal,
            }
        );
        assert_eq!(script.steps[5], Step::ScrollBy { delta: -20 });
    }

    #[test]
    fn step_labels() {
        let cart = HolderId::new("cart").unwrap();
        assert_eq!(
            Step::Open {
                overlay: cart.clone(),
                kind: OverlayKind::Modal
            }
            .to_string(),
            "open cart"
        );
        assert_eq!(Step::ScrollBy { delta: 15 }.to_string(), "scroll_by +15");
        assert_eq!(Step::Scroll { to: ScrollOffset::new(7) }.to_string(), "scroll 7");
        assert_eq!(Step::Navigate.to_string(), "navigate");
    }

    #[test]
    fn invalid_overlay_id_rejected() {
        let err = Script::parse(r#"{ "steps": [ { "op": "open", "overlay": "no spaces" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, ScriptError::ParseError(_)));
    }

    #[test]
    fn unknown_op_rejected() {
        let err = Script::parse(r#"{ "steps": [ { "op": "teleport" } ] }"#).unwrap_err();
        assert!(matches!(err, ScriptError::ParseError(_)));
    }

    #[test]
    fn negative_bounds_rejected() {
        let err = Script::parse(r#"{ "max_scroll": -1, "steps": [] }"#).unwrap_err();
        assert!(matches!(err, ScriptError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = Script::load(&temp.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
