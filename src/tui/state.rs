//! Loop state shared across refresh cycles.

use crate::collector::{SlabNodes, SlabSummary};
use crate::sort::SortField;

use super::geometry::Geometry;

/// Everything that persists between cycles: the active sort field, tracked
/// terminal geometry, and the reused cache buffer. The summary is overwritten
/// fresh every cycle.
#[derive(Debug)]
pub struct AppState {
    pub sort: SortField,
    pub geometry: Geometry,
    pub nodes: SlabNodes,
    pub summary: SlabSummary,
}

impl AppState {
    pub fn new(sort: SortField, max_caches: usize) -> Self {
        Self {
            sort,
            geometry: Geometry::default(),
            nodes: SlabNodes::with_capacity(max_caches),
            summary: SlabSummary::default(),
        }
    }
}
