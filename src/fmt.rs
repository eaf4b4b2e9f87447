//! Fixed-width line builders shared by the interactive and one-shot sinks.
//!
//! Pure string functions, no terminal types. The column layout follows the
//! classic slabtop display so existing eyes (and scripts scraping `--once`
//! output) keep working.

use crate::collector::{SlabCache, SlabSummary};

/// Column headings for the eight displayed fields, padded to the classic
/// 78-column width.
pub fn header_line() -> String {
    format!(
        "{:<78}",
        "  OBJS ACTIVE  USE OBJ SIZE  SLABS OBJ/SLAB CACHE SIZE NAME"
    )
}

/// Percentage `100 * active / total` with one decimal, or a fixed
/// placeholder when `total` is zero.
pub fn percent(active: u64, total: u64) -> String {
    if total == 0 {
        "-.-".to_string()
    } else {
        format!("{:.1}", 100.0 * active as f64 / total as f64)
    }
}

/// The five summary lines above the cache table.
pub fn summary_lines(s: &SlabSummary) -> [String; 5] {
    let kib = |bytes: u64| bytes as f64 / 1024.0;
    [
        format!(
            " {:<35}: {} / {} ({}%)",
            "Active / Total Objects (% used)",
            s.active_objs,
            s.total_objs,
            percent(s.active_objs, s.total_objs)
        ),
        format!(
            " {:<35}: {} / {} ({}%)",
            "Active / Total Slabs (% used)",
            s.active_slabs,
            s.total_slabs,
            percent(s.active_slabs, s.total_slabs)
        ),
        format!(
            " {:<35}: {} / {} ({}%)",
            "Active / Total Caches (% used)",
            s.active_caches,
            s.total_caches,
            percent(s.active_caches, s.total_caches)
        ),
        format!(
            " {:<35}: {:.2}K / {:.2}K ({}%)",
            "Active / Total Size (% used)",
            kib(s.active_size),
            kib(s.total_size),
            percent(s.active_size, s.total_size)
        ),
        format!(
            " {:<35}: {:.2}K / {:.2}K / {:.2}K",
            "Minimum / Average / Maximum Object",
            kib(s.min_obj_size),
            kib(s.avg_obj_size),
            kib(s.max_obj_size)
        ),
    ]
}

/// One cache row: objects, active, use%, object size (KiB), slabs,
/// objects per slab, cache size (whole KiB), name.
pub fn cache_line(c: &SlabCache) -> String {
    format!(
        "{:6} {:6} {:3}% {:7.2}K {:6} {:8} {:9}K {:<23}",
        c.num_objs,
        c.active_objs,
        c.use_pct,
        c.obj_size as f64 / 1024.0,
        c.num_slabs,
        c.objs_per_slab,
        c.cache_size / 1024,
        c.name
    )
}
