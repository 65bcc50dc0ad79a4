//! config command - Show the effective configuration

use anyhow::{Context as _, Result};

use super::load_config;
use crate::cli::Context;

/// Print the effective configuration as TOML.
///
/// Values missing from the file are shown with their defaults.
pub fn show(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    let rendered = config.to_toml().context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}

/// Print where the configuration came from.
pub fn path(ctx: &Context) -> Result<()> {
    let config = load_config(ctx)?;
    match config.loaded_from() {
        Some(path) => println!("{}", path.display()),
        None => println!("(defaults; no config file found)"),
    }
    Ok(())
}
