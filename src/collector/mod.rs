//! Slab statistics collection from `/proc/slabinfo`.
//!
//! `SlabCollector` owns the source path and re-reads it on every cycle; the
//! caller owns a reusable `SlabNodes` buffer that gets overwritten in place
//! rather than reallocated per tick.

use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

pub mod mock;
pub mod slabinfo;
pub mod traits;

pub use mock::MockFs;
pub use slabinfo::{ParseError, SlabCache};
pub use traits::{FileSystem, RealFs};

/// Default bound on buffered cache records, matching slabtop's historical
/// chain allocation. Caches beyond the bound are counted in the summary but
/// not displayed.
pub const DEFAULT_MAX_CACHES: usize = 150;

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    Io(io::Error),
    Parse(ParseError),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "reading slabinfo: {}", e),
            CollectError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Io(e) => Some(e),
            CollectError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for CollectError {
    fn from(e: io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Parse(e)
    }
}

/// Fixed-capacity, reused buffer of cache records.
///
/// Allocated once at startup; `SlabCollector::fill` overwrites the contents
/// each cycle and flags truncation when more caches exist than fit.
#[derive(Debug, Clone)]
pub struct SlabNodes {
    caches: Vec<SlabCache>,
    capacity: usize,
    truncated: bool,
}

impl SlabNodes {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            caches: Vec::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    /// Number of records populated during the current cycle.
    pub fn live(&self) -> usize {
        self.caches.len()
    }

    /// True when the last fill found more caches than the buffer holds.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn caches(&self) -> &[SlabCache] {
        &self.caches
    }

    pub fn caches_mut(&mut self) -> &mut [SlabCache] {
        &mut self.caches
    }

    fn reset(&mut self) {
        self.caches.clear();
        self.truncated = false;
    }

    fn push(&mut self, cache: SlabCache) -> bool {
        if self.caches.len() < self.capacity {
            self.caches.push(cache);
            true
        } else {
            self.truncated = true;
            false
        }
    }
}

impl Default for SlabNodes {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_CACHES)
    }
}

/// Aggregate statistics over all caches, recomputed fresh every cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlabSummary {
    pub active_objs: u64,
    pub total_objs: u64,
    pub active_slabs: u64,
    pub total_slabs: u64,
    pub active_caches: u64,
    pub total_caches: u64,
    /// Active footprint in bytes.
    pub active_size: u64,
    /// Total footprint in bytes.
    pub total_size: u64,
    pub min_obj_size: u64,
    pub avg_obj_size: u64,
    pub max_obj_size: u64,
}

/// Reader of kernel slab statistics.
pub struct SlabCollector<F: FileSystem> {
    fs: F,
    path: PathBuf,
    page_size: u64,
}

impl<F: FileSystem> SlabCollector<F> {
    /// Opens the slabinfo source, validating that it exists and carries a
    /// supported header. Typically needs root on a real system.
    pub fn open(fs: F, proc_path: &str) -> Result<Self, CollectError> {
        let path = PathBuf::from(proc_path).join("slabinfo");
        let content = fs.read_to_string(&path)?;
        let first_line = content.lines().next().unwrap_or("");
        slabinfo::parse_version(first_line)?;

        let page_size = page_size();
        debug!("opened {} (page size {})", path.display(), page_size);

        Ok(Self {
            fs,
            path,
            page_size,
        })
    }

    /// Re-reads the source and overwrites `nodes` with the current records,
    /// up to the buffer's capacity. Returns the live count.
    pub fn fill(&self, nodes: &mut SlabNodes) -> Result<usize, CollectError> {
        let content = self.fs.read_to_string(&self.path)?;
        let mut lines = content.lines();
        slabinfo::parse_version(lines.next().unwrap_or(""))?;

        nodes.reset();
        for line in lines.filter(|l| slabinfo::is_record_line(l)) {
            let cache = slabinfo::parse_cache_line(line, self.page_size)?;
            if !nodes.push(cache) {
                warn!(
                    "more than {} slab caches, display truncated",
                    nodes.capacity
                );
                break;
            }
        }
        Ok(nodes.live())
    }

    /// Computes aggregate statistics over every cache in the source,
    /// including those beyond the node buffer's capacity.
    pub fn summary(&self) -> Result<SlabSummary, CollectError> {
        let content = self.fs.read_to_string(&self.path)?;
        let mut lines = content.lines();
        slabinfo::parse_version(lines.next().unwrap_or(""))?;

        let mut s = SlabSummary::default();
        let mut min: Option<u64> = None;
        for line in lines.filter(|l| slabinfo::is_record_line(l)) {
            let cache = slabinfo::parse_cache_line(line, self.page_size)?;
            s.active_objs += cache.active_objs;
            s.total_objs += cache.num_objs;
            s.active_slabs += cache.active_slabs;
            s.total_slabs += cache.num_slabs;
            s.total_caches += 1;
            if cache.num_objs > 0 {
                s.active_caches += 1;
            }
            s.active_size += cache.active_objs * cache.obj_size;
            s.total_size += cache.num_objs * cache.obj_size;
            min = Some(min.map_or(cache.obj_size, |m| m.min(cache.obj_size)));
            s.max_obj_size = s.max_obj_size.max(cache.obj_size);
        }
        s.min_obj_size = min.unwrap_or(0);
        s.avg_obj_size = if s.total_objs > 0 {
            s.total_size / s.total_objs
        } else {
            0
        };
        Ok(s)
    }
}

/// System page size in bytes, used to derive cache footprints.
#[cfg(target_os = "linux")]
fn page_size() -> u64 {
    // SAFETY: sysconf with a valid name has no preconditions.
    let sz = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if sz > 0 { sz as u64 } else { 4096 }
}

#[cfg(not(target_os = "linux"))]
fn page_size() -> u64 {
    4096
}
