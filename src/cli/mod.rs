//! cli
//!
//! Command-line interface layer for scrollgate.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and set up diagnostics
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`commands`], which drive the library through the same APIs a UI layer
//! would use.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, ConfigAction, Shell};

use std::path::PathBuf;

use anyhow::Result;

use crate::ui::output::{self, Verbosity};

/// Per-invocation settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Explicit config file, if given
    pub config_path: Option<PathBuf>,
    /// Output verbosity
    pub verbosity: Verbosity,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        config_path: cli.config.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };
    output::init_tracing(ctx.verbosity);

    commands::dispatch(cli.command, &ctx)
}
