//! core
//!
//! Core domain types, state, and configuration for scrollgate.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ScrollOffset, Generation, HolderId
//! - [`state`] - Pure holder-count state machine
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - State transitions are pure and side-effect free
//! - Schemas are strict and self-describing

pub mod config;
pub mod state;
pub mod types;
