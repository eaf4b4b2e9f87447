//! Sort field selection and cache ordering.

use std::cmp::Ordering;

use crate::collector::SlabCache;

/// Sortable cache fields.
///
/// `PagesPerSlab` and `ActiveSlabs` are sortable but never rendered as
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Objects,
    ActiveObjects,
    Utilization,
    ObjectSize,
    Slabs,
    ObjectsPerSlab,
    CacheSize,
    Name,
    PagesPerSlab,
    ActiveSlabs,
}

impl SortField {
    /// Maps a single keystroke to a sort field, case-insensitively.
    /// Unrecognized input yields the default field.
    pub fn from_key(key: char) -> SortField {
        match key.to_ascii_lowercase() {
            'n' => SortField::Name,
            'o' => SortField::Objects,
            'a' => SortField::ActiveObjects,
            's' => SortField::ObjectSize,
            'b' => SortField::ObjectsPerSlab,
            'p' => SortField::PagesPerSlab,
            'l' => SortField::Slabs,
            'v' => SortField::ActiveSlabs,
            'c' => SortField::CacheSize,
            'u' => SortField::Utilization,
            _ => SortField::default(),
        }
    }

    /// Display ordering between two caches under this field: numeric fields
    /// largest-first, names lexicographic.
    fn compare(self, a: &SlabCache, b: &SlabCache) -> Ordering {
        match self {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Objects => b.num_objs.cmp(&a.num_objs),
            SortField::ActiveObjects => b.active_objs.cmp(&a.active_objs),
            SortField::Utilization => b.use_pct.cmp(&a.use_pct),
            SortField::ObjectSize => b.obj_size.cmp(&a.obj_size),
            SortField::Slabs => b.num_slabs.cmp(&a.num_slabs),
            SortField::ObjectsPerSlab => b.objs_per_slab.cmp(&a.objs_per_slab),
            SortField::CacheSize => b.cache_size.cmp(&a.cache_size),
            SortField::PagesPerSlab => b.pages_per_slab.cmp(&a.pages_per_slab),
            SortField::ActiveSlabs => b.active_slabs.cmp(&a.active_slabs),
        }
    }
}

/// Orders the live records by the given field. Stable: ties keep their
/// fetch order.
pub fn sort_caches(field: SortField, caches: &mut [SlabCache]) {
    caches.sort_by(|a, b| field.compare(a, b));
}
