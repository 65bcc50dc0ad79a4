//! scrollgate - Reference-counted scroll lock for overlapping modals
//!
//! When several modal-like views are open at once, each of them wants
//! background page scrolling suppressed, and their open/close lifecycles
//! interleave. Letting every view toggle the page directly races: the first
//! one to close unpins the page while another is still open. scrollgate
//! counts holders instead, engaging the page once on the first acquire and
//! restoring it once on the last release.
//!
//! # Architecture
//!
//! - [`core`] - Strong types, the pure state machine, configuration
//! - [`surface`] - The page the lock acts on (trait plus implementations)
//! - [`lock`] - The reference-counted lock and its RAII guard
//! - [`lifecycle`] - Overlay views and the navigation backstop
//! - [`script`] - Replayable lifecycle scripts and the simulator
//! - [`cli`] - The `sg` command-line interface
//! - [`ui`] - Terminal output and diagnostics setup
//!
//! # Correctness Invariants
//!
//! 1. The holder count never goes negative
//! 2. The page is engaged exactly once per idle -> held transition
//! 3. The page is disengaged exactly once per held -> idle transition
//! 4. The offset restored is the one captured at the first acquire
//! 5. Force release always leaves the lock idle

pub mod cli;
pub mod core;
pub mod lifecycle;
pub mod lock;
pub mod script;
pub mod surface;
pub mod ui;
