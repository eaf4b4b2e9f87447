//! Parser for `/proc/slabinfo`.
//!
//! Pure functions that parse slabinfo text into structured records. They are
//! designed to be testable with string inputs, independent of any real
//! filesystem.
//!
//! The 2.x format is one record per line:
//!
//! ```text
//! # name <active_objs> <num_objs> <objsize> <objperslab> <pagesperslab> \
//!   : tunables <limit> <batchcount> <sharedfactor> \
//!   : slabdata <active_slabs> <num_slabs> <sharedavail>
//! ```

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slabinfo parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// One slab cache record with derived display fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlabCache {
    pub name: String,
    pub active_objs: u64,
    pub num_objs: u64,
    /// Object size in bytes.
    pub obj_size: u64,
    pub objs_per_slab: u64,
    pub pages_per_slab: u64,
    pub active_slabs: u64,
    pub num_slabs: u64,
    /// Utilization, `100 * active_objs / num_objs` (0 when the cache is empty).
    pub use_pct: u64,
    /// Total cache footprint in bytes, `num_slabs * pages_per_slab * page_size`.
    pub cache_size: u64,
}

/// Validates the slabinfo header line. Only the 2.x format is supported.
pub fn parse_version(first_line: &str) -> Result<(), ParseError> {
    let version = first_line
        .trim()
        .strip_prefix("slabinfo - version:")
        .map(str::trim)
        .ok_or_else(|| ParseError::new(format!("unexpected header: '{}'", first_line.trim())))?;

    if version.starts_with("2.") {
        Ok(())
    } else {
        Err(ParseError::new(format!(
            "unsupported slabinfo version: {}",
            version
        )))
    }
}

/// Parses one cache record line.
///
/// `page_size` is needed to derive the cache byte footprint from its slab
/// count, mirroring how the kernel reports slabinfo in pages.
pub fn parse_cache_line(line: &str, page_size: u64) -> Result<SlabCache, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    // name + 5 stats, then at minimum ": tunables x x x : slabdata x x x"
    if fields.len() < 6 {
        return Err(ParseError::new(format!(
            "not enough fields in cache line: '{}'",
            line.trim()
        )));
    }

    let num = |idx: usize, name: &str| -> Result<u64, ParseError> {
        fields[idx]
            .parse()
            .map_err(|_| ParseError::new(format!("invalid {}: '{}'", name, fields[idx])))
    };

    let name = fields[0].to_string();
    let active_objs = num(1, "active_objs")?;
    let num_objs = num(2, "num_objs")?;
    let obj_size = num(3, "objsize")?;
    let objs_per_slab = num(4, "objperslab")?;
    let pages_per_slab = num(5, "pagesperslab")?;

    // The slabdata triple sits after the second ':' separator; locate it by
    // keyword so extra tunables never break the parse.
    let slabdata_idx = fields
        .iter()
        .position(|f| *f == "slabdata")
        .ok_or_else(|| ParseError::new(format!("missing slabdata section: '{}'", line.trim())))?;
    if fields.len() < slabdata_idx + 3 {
        return Err(ParseError::new("truncated slabdata section"));
    }
    let active_slabs = num(slabdata_idx + 1, "active_slabs")?;
    let num_slabs = num(slabdata_idx + 2, "num_slabs")?;

    let use_pct = if num_objs > 0 {
        100 * active_objs / num_objs
    } else {
        0
    };
    let cache_size = num_slabs * pages_per_slab * page_size;

    Ok(SlabCache {
        name,
        active_objs,
        num_objs,
        obj_size,
        objs_per_slab,
        pages_per_slab,
        active_slabs,
        num_slabs,
        use_pct,
        cache_size,
    })
}

/// Returns true for lines that carry no cache record (comments, blanks).
pub fn is_record_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "ext4_inode_cache   53568  54340   1176   27    8 \
                        : tunables    0    0    0 : slabdata   2013   2013      0";

    #[test]
    fn parses_version_2_headers() {
        assert!(parse_version("slabinfo - version: 2.1").is_ok());
        assert!(parse_version("slabinfo - version: 2.1 (statistics)").is_ok());
    }

    #[test]
    fn rejects_unknown_headers() {
        assert!(parse_version("slabinfo - version: 1.1").is_err());
        assert!(parse_version("garbage").is_err());
    }

    #[test]
    fn parses_cache_line() {
        let cache = parse_cache_line(LINE, 4096).unwrap();
        assert_eq!(cache.name, "ext4_inode_cache");
        assert_eq!(cache.active_objs, 53568);
        assert_eq!(cache.num_objs, 54340);
        assert_eq!(cache.obj_size, 1176);
        assert_eq!(cache.objs_per_slab, 27);
        assert_eq!(cache.pages_per_slab, 8);
        assert_eq!(cache.active_slabs, 2013);
        assert_eq!(cache.num_slabs, 2013);
        assert_eq!(cache.use_pct, 98);
        assert_eq!(cache.cache_size, 2013 * 8 * 4096);
    }

    #[test]
    fn empty_cache_has_zero_utilization() {
        let line = "empty_cache 0 0 64 64 1 : tunables 0 0 0 : slabdata 0 0 0";
        let cache = parse_cache_line(line, 4096).unwrap();
        assert_eq!(cache.use_pct, 0);
        assert_eq!(cache.cache_size, 0);
    }

    #[test]
    fn rejects_short_and_malformed_lines() {
        assert!(parse_cache_line("dentry 1 2", 4096).is_err());
        assert!(parse_cache_line("dentry one 2 3 4 5 : slabdata 1 1 0", 4096).is_err());
        assert!(parse_cache_line("dentry 1 2 3 4 5 : tunables 0 0 0", 4096).is_err());
    }

    #[test]
    fn record_line_filter_skips_comments_and_blanks() {
        assert!(is_record_line(LINE));
        assert!(!is_record_line("# name <active_objs> ..."));
        assert!(!is_record_line("   "));
    }
}
