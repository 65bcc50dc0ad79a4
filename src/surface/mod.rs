//! surface
//!
//! The page the scroll lock acts on.
//!
//! # Architecture
//!
//! The lock never touches page state directly. It calls a [`ScrollSurface`],
//! which applies or reverts the engage effect. Implementations:
//!
//! - [`Viewport`] - In-memory page model with a scroll offset and body style
//! - [`RecordingSurface`] - Records every call for deterministic tests

pub mod recording;
pub mod traits;
pub mod viewport;

pub use recording::{RecordingSurface, SurfaceEvent};
pub use traits::ScrollSurface;
pub use viewport::{BodyStyle, Overflow, Position, Viewport};
