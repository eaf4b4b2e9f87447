//! Interactive terminal interface for slabmon.
//!
//! A single-threaded refresh loop driven by a bounded wait: each cycle
//! fetches and sorts fresh slab statistics, paints one frame, then blocks on
//! the event channel until the tick timer fires, a key arrives, the terminal
//! resizes, or an interrupt is delivered.

mod app;
mod event;
mod geometry;
mod input;
mod render;
mod state;

pub use app::{App, AppError};
pub use geometry::Geometry;
