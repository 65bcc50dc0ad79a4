//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file instead of the default lookup
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// scrollgate - Reference-counted scroll lock for overlapping modals
#[derive(Parser, Debug)]
#[command(name = "sg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a lifecycle script and show what the scroll lock did
    #[command(
        name = "replay",
        long_about = "Replay a lifecycle script and show what the scroll lock did.\n\n\
            The script is a JSON file listing overlay opens and closes, scrolls, \
            navigations, and raw acquire/release calls. Each step is applied to an \
            in-memory page and the resulting holder count, lock state, visible \
            offset, and surface effect are printed.",
        after_help = "\
EXAMPLES:
    # Print the trace as a table
    sg replay checkout.json

    # Machine-readable trace
    sg replay checkout.json --json

SCRIPT FORMAT:
    {
      \"initial_scroll\": 120,
      \"steps\": [
        { \"op\": \"open\", \"overlay\": \"cart\", \"kind\": \"bottom_sheet\" },
        { \"op\": \"close\", \"overlay\": \"cart\" },
        { \"op\": \"navigate\" }
      ]
    }"
    )]
    Replay {
        /// Path to the script
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Output the trace as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
EXAMPLES:
    # Bash
    sg completion bash > /etc/bash_completion.d/sg

    # Zsh
    sg completion zsh > \"${fpath[1]}/_sg\"

    # Fish
    sg completion fish > ~/.config/fish/completions/sg.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the path the configuration was loaded from
    Path,
}

/// Shells supported by `sg completion`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
