//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration (explicit `--config` path or default lookup)
//! 2. Calls into the library
//! 3. Formats and displays output

mod completion;
mod config_cmd;
mod replay;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{path as config_path, show as config_show};
pub use replay::replay;

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use crate::core::config::Config;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Replay { script, json } => replay(ctx, &script, json),
        Command::Config { action } => match action {
            ConfigAction::Show => config_show(ctx),
            ConfigAction::Path => config_path(ctx),
        },
        Command::Completion { shell } => completion(shell),
    }
}

/// Load configuration for a command.
pub(crate) fn load_config(ctx: &Context) -> Result<Config> {
    let config = Config::load(ctx.config_path.as_deref()).context("Failed to load config")?;
    match config.loaded_from() {
        Some(path) => output::debug(
            format!("Loaded config from {}", path.display()),
            ctx.verbosity,
        ),
        None => output::debug("No config file found, using defaults", ctx.verbosity),
    }
    Ok(config)
}
