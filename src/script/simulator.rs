//! script::simulator
//!
//! Runs a [`Script`] against an in-memory page.
//!
//! Every step is applied through the same APIs a UI layer would use:
//! overlays go through [`Overlay`], navigation through
//! [`crate::lifecycle::navigate`], and raw steps call the lock directly.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Script, Step};
use crate::core::config::Config;
use crate::core::types::{HolderId, ScrollOffset};
use crate::lifecycle::{self, Overlay};
use crate::lock::{LockOptions, LockStats, ScrollLock};
use crate::surface::{ScrollSurface, Viewport};

/// Surface effect a step caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum Effect {
    /// The page was pinned at `at`.
    Engaged { at: ScrollOffset },
    /// The page was released and scrolled back to `restored`.
    Disengaged { restored: ScrollOffset },
}

/// State after one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    /// 1-based step number
    pub step: usize,
    /// Human-readable step label
    pub op: String,
    /// Holder count after the step
    pub count: usize,
    /// Whether the page is pinned after the step
    pub held: bool,
    /// Offset the user sees after the step
    pub visual_offset: ScrollOffset,
    /// Surface effect, if any
    #[serde(flatten)]
    pub effect: Option<Effect>,
    /// Anything else worth pointing out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Full result of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replay {
    pub entries: Vec<TraceEntry>,
    pub stats: LockStats,
    pub final_count: usize,
    pub final_offset: ScrollOffset,
}

/// Applies steps to a viewport-backed lock.
pub struct Simulator {
    lock: ScrollLock<Viewport>,
    overlays: BTreeMap<HolderId, Overlay<Viewport>>,
    step: usize,
}

impl Simulator {
    /// A simulator over `viewport`.
    pub fn new(viewport: Viewport, options: LockOptions) -> Self {
        Self {
            lock: ScrollLock::with_options(viewport, options),
            overlays: BTreeMap::new(),
            step: 0,
        }
    }

    /// A simulator for `script`, filling page bounds and lock options
    /// from `config`.
    pub fn for_script(script: &Script, config: &Config) -> Self {
        let max = script.max_scroll.unwrap_or_else(|| config.max_scroll());
        let initial = script.initial_scroll.unwrap_or_else(|| config.initial_scroll());
        Self::new(Viewport::new(initial, max), LockOptions::from(config))
    }

    /// Run every step of `script` and collect the trace.
    pub fn run(script: &Script, config: &Config) -> Replay {
        let mut sim = Self::for_script(script, config);
        let entries = script.steps.iter().map(|s| sim.apply(s)).collect();
        sim.finish(entries)
    }

    /// The lock being driven.
    pub fn lock(&self) -> &ScrollLock<Viewport> {
        &self.lock
    }

    /// Apply one step.
    pub fn apply(&mut self, step: &Step) -> TraceEntry {
        self.step += 1;
        let before = self.lock.stats();
        let note = self.dispatch(step);
        let after = self.lock.stats();

        let effect = if after.disengagements > before.disengagements {
            Some(Effect::Disengaged {
                restored: self.visual_offset(),
            })
        } else if after.engagements > before.engagements {
            self.lock.saved_position().map(|at| Effect::Engaged { at })
        } else {
            None
        };

        let note = note.or_else(|| {
            (after.absorbed_releases > before.absorbed_releases)
                .then(|| "release absorbed: lock was idle".to_string())
        });

        TraceEntry {
            step: self.step,
            op: step.to_string(),
            count: self.lock.count(),
            held: self.lock.is_held(),
            visual_offset: self.visual_offset(),
            effect,
            note,
        }
    }

    fn dispatch(&mut self, step: &Step) -> Option<String> {
        match step {
            Step::Open { overlay, kind } => {
                let entry = self
                    .overlays
                    .entry(overlay.clone())
                    .or_insert_with(|| Overlay::new(overlay.clone(), *kind, &self.lock));
                match entry.open() {
                    Some(_) => None,
                    None => Some("already open".to_string()),
                }
            }
            Step::Close { overlay } => match self.overlays.get_mut(overlay) {
                Some(o) if o.is_open() => {
                    let current = o.holds_lock();
                    o.close();
                    (!current).then(|| "orphaned by navigation; nothing released".to_string())
                }
                _ => Some("not open".to_string()),
            },
            Step::Drop { overlay } => match self.overlays.remove(overlay) {
                Some(o) => (!o.is_open()).then(|| "was closed".to_string()),
                None => Some("unknown overlay".to_string()),
            },
            Step::Scroll { to } => {
                let moved = self.lock.with_surface_mut(|v| {
                    let before = v.scroll_position();
                    v.scroll_to(*to);
                    v.scroll_position() != before
                });
                self.scroll_note(moved)
            }
            Step::ScrollBy { delta } => {
                let moved = self.lock.with_surface_mut(|v| v.scroll_by(*delta));
                self.scroll_note(moved)
            }
            Step::Navigate => {
                let forced = lifecycle::navigate(&self.lock);
                (forced.orphaned > 0).then(|| format!("{} holder(s) orphaned", forced.orphaned))
            }
            Step::Acquire => {
                self.lock.acquire();
                None
            }
            Step::Release => {
                self.lock.release();
                None
            }
        }
    }

    fn scroll_note(&self, moved: bool) -> Option<String> {
        match (moved, self.lock.is_held()) {
            (true, _) => None,
            (false, true) => Some("ignored: page is pinned".to_string()),
            (false, false) => Some("no movement".to_string()),
        }
    }

    fn visual_offset(&self) -> ScrollOffset {
        self.lock.with_surface(|v| v.visual_offset())
    }

    fn finish(self, entries: Vec<TraceEntry>) -> Replay {
        Replay {
            entries,
            stats: self.lock.stats(),
            final_count: self.lock.count(),
            final_offset: self.visual_offset(),
        }
    }
}
