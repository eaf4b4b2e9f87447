//! slabmon - interactive monitor for kernel slab-allocator statistics.
//!
//! Samples `/proc/slabinfo` at a configurable cadence and renders a live,
//! sortable cache table with summary metrics, or a single plain-text dump in
//! one-shot mode.

pub mod collector;
pub mod fmt;
pub mod oneshot;
pub mod sort;
pub mod tui;
