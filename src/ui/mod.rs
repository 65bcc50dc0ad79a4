//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting, verbosity, and diagnostics setup
//!
//! # Design
//!
//! All terminal output goes through this module so quiet and debug modes
//! behave the same for every command.

pub mod output;
