//! replay command - Run a lifecycle script against an in-memory page

use std::path::Path;

use anyhow::{Context as _, Result};

use super::load_config;
use crate::cli::Context;
use crate::script::{Script, Simulator};
use crate::ui::output;

/// Replay `script_path` and print the trace.
pub fn replay(ctx: &Context, script_path: &Path, json: bool) -> Result<()> {
    let config = load_config(ctx)?;
    let script = Script::load(script_path)
        .with_context(|| format!("Failed to load script {}", script_path.display()))?;

    output::debug(
        format!("Replaying {} step(s)", script.steps.len()),
        ctx.verbosity,
    );
    let replay = Simulator::run(&script, &config);

    if json {
        let rendered =
            serde_json::to_string_pretty(&replay).context("Failed to serialize trace")?;
        println!("{}", rendered);
        return Ok(());
    }

    if replay.stats.absorbed_releases > 0 {
        output::warn(
            format!(
                "{} release(s) arrived while the lock was idle",
                replay.stats.absorbed_releases
            ),
            ctx.verbosity,
        );
    }
    if replay.final_count > 0 {
        output::warn(
            format!(
                "script ended with {} holder(s); the page is still pinned",
                replay.final_count
            ),
            ctx.verbosity,
        );
    }

    output::print(output::format_replay(&replay), ctx.verbosity);
    if ctx.verbosity == output::Verbosity::Quiet {
        println!("{}", output::format_summary(&replay));
    }
    Ok(())
}
