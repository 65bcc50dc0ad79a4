//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, output is machine-readable JSON.
//! Library diagnostics go through `tracing`; [`init_tracing`] installs the
//! stderr subscriber that matches the chosen verbosity.

use std::fmt::Display;

use tracing::Level;

use crate::script::{Effect, Replay, TraceEntry};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Most verbose `tracing` level shown at this verbosity.
    pub fn tracing_level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::WARN,
            Verbosity::Debug => Level::DEBUG,
        }
    }
}

/// Install a stderr `tracing` subscriber for `verbosity`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(verbosity.tracing_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format one trace entry as a table row.
pub fn format_entry(entry: &TraceEntry) -> String {
    let effect = match entry.effect {
        Some(Effect::Engaged { at }) => format!("engaged at {}", at),
        Some(Effect::Disengaged { restored }) => format!("disengaged, restored {}", restored),
        None => "-".to_string(),
    };
    let mut row = format!(
        "{:>4}  {:<24} {:>5}  {:<4}  {:>8}  {}",
        entry.step,
        entry.op,
        entry.count,
        if entry.held { "held" } else { "idle" },
        entry.visual_offset.to_string(),
        effect
    );
    if let Some(note) = &entry.note {
        row.push_str(&format!("  ({})", note));
    }
    row
}

/// Format a replay as a table followed by a summary line.
pub fn format_replay(replay: &Replay) -> String {
    let mut lines = Vec::with_capacity(replay.entries.len() + 2);
    lines.push(format!(
        "{:>4}  {:<24} {:>5}  {:<4}  {:>8}  {}",
        "step", "op", "count", "lock", "offset", "effect"
    ));
    lines.extend(replay.entries.iter().map(format_entry));
    lines.push(format_summary(replay));
    lines.join("\n")
}

/// One-line summary of a replay.
pub fn format_summary(replay: &Replay) -> String {
    format!(
        "final count {}, offset {}; {} engaged, {} disengaged, {} absorbed, {} orphaned",
        replay.final_count,
        replay.final_offset,
        replay.stats.engagements,
        replay.stats.disengagements,
        replay.stats.absorbed_releases,
        replay.stats.orphaned_holders
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::script::{Script, Simulator};

    fn replay(json: &str) -> Replay {
        Simulator::run(&Script::parse(json).unwrap(), &Config::default())
    }

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn tracing_levels() {
        assert_eq!(Verbosity::Debug.tracing_level(), Level::DEBUG);
        assert_eq!(Verbosity::Quiet.tracing_level(), Level::ERROR);
    }

    #[test]
    fn entry_row_shows_effect_and_note() {
        let r = replay(
            r#"{ "initial_scroll": 120, "steps": [ { "op": "open", "overlay": "cart" }, { "op": "release" }, { "op": "release" } ] }"#,
        );
        let rows: Vec<String> = r.entries.iter().map(format_entry).collect();
        assert!(rows[0].contains("open cart"));
        assert!(rows[0].contains("engaged at 120px"));
        assert!(rows[1].contains("disengaged, restored 120px"));
        assert!(rows[2].contains("(release absorbed: lock was idle)"));
    }

    #[test]
    fn summary_counts() {
        let r = replay(r#"{ "steps": [ { "op": "acquire" }, { "op": "navigate" } ] }"#);
        assert_eq!(
            format_summary(&r),
            "final count 0, offset 0px; 1 engaged, 1 disengaged, 0 absorbed, 1 orphaned"
        );
    }

    #[test]
    fn table_has_header_and_summary() {
        let r = replay(r#"{ "steps": [ { "op": "acquire" } ] }"#);
        let table = format_replay(&r);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("effect"));
        assert!(lines[2].starts_with("final count 1"));
    }
}
