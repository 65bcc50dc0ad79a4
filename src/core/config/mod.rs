//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! The first match wins:
//! 1. An explicit path (`--config`)
//! 2. `$SCROLLGATE_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/scrollgate/config.toml`
//! 4. `~/.scrollgate/config.toml`
//!
//! An explicit path that does not exist is an error. The other locations
//! are skipped when missing.
//!
//! # Example
//!
//! ```no_run
//! use scrollgate::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("excess releases: {:?}", config.excess_release());
//! println!("max scroll: {}", config.max_scroll());
//! ```

pub mod schema;

pub use schema::{ExcessReleasePolicy, FileConfig, LockSection, ViewportSection};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::ScrollOffset;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "SCROLLGATE_CONFIG";

/// Default `viewport.max_scroll`.
pub const DEFAULT_MAX_SCROLL: i64 = 10_000;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Effective configuration: file values over defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Parsed file contents (empty when no file was found)
    pub file: FileConfig,
    /// Path the file was loaded from
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path or the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit path is missing, or if a config
    /// file exists but cannot be read, parsed, or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_file(path);
        }

        let candidates = Self::candidate_paths(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        );

        match candidates.into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_file(&path),
            None => Ok(Config::default()),
        }
    }

    /// Ordered lookup locations for the given environment.
    pub fn candidate_paths(
        env_path: Option<PathBuf>,
        xdg_home: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(3);
        paths.extend(env_path);
        paths.extend(xdg_home.map(|x| x.join("scrollgate/config.toml")));
        paths.extend(home.map(|h| h.join(".scrollgate/config.toml")));
        paths
    }

    /// Configuration built from already-parsed file contents.
    pub fn from_file(file: FileConfig) -> Config {
        Config {
            file,
            loaded_from: None,
        }
    }

    /// Read, parse, and validate one config file.
    pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file = Self::parse(&contents).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        Ok(Config {
            file,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    /// Parse and validate TOML text.
    pub fn parse(contents: &str) -> Result<FileConfig, ConfigError> {
        let file: FileConfig = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        file.validate()?;
        Ok(file)
    }

    /// The effective settings rendered as a complete TOML document.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let effective = FileConfig {
            lock: Some(LockSection {
                excess_release: Some(self.excess_release()),
                restore_scroll: Some(self.restore_scroll()),
            }),
            viewport: Some(ViewportSection {
                initial_scroll: Some(self.initial_scroll().as_px()),
                max_scroll: Some(self.max_scroll().as_px()),
            }),
        };
        toml::to_string_pretty(&effective).map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Diagnostic policy for excess releases.
    ///
    /// Defaults to `warn`.
    pub fn excess_release(&self) -> ExcessReleasePolicy {
        self.file
            .lock
            .as_ref()
            .and_then(|l| l.excess_release)
            .unwrap_or_default()
    }

    /// Whether disengaging restores the saved scroll offset.
    ///
    /// Defaults to `true`.
    pub fn restore_scroll(&self) -> bool {
        self.file
            .lock
            .as_ref()
            .and_then(|l| l.restore_scroll)
            .unwrap_or(true)
    }

    /// Starting scroll offset for replays.
    ///
    /// Defaults to the top of the page.
    pub fn initial_scroll(&self) -> ScrollOffset {
        self.file
            .viewport
            .as_ref()
            .and_then(|v| v.initial_scroll)
            .map(ScrollOffset::new)
            .unwrap_or(ScrollOffset::TOP)
    }

    /// Largest scroll offset for replays.
    ///
    /// Defaults to [`DEFAULT_MAX_SCROLL`].
    pub fn max_scroll(&self) -> ScrollOffset {
        ScrollOffset::new(
            self.file
                .viewport
                .as_ref()
                .and_then(|v| v.max_scroll)
                .unwrap_or(DEFAULT_MAX_SCROLL),
        )
    }

    /// Get the path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}
