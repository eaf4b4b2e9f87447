//! One-shot mode: a single sample-and-print cycle to a plain writer.

use std::io::Write;

use crate::collector::{CollectError, FileSystem, SlabCollector, SlabNodes};
use crate::fmt;
use crate::sort::{SortField, sort_caches};

/// Performs exactly one fetch-and-sort-and-render cycle, writing
/// newline-terminated lines to `out` (stdout in the binary, a byte buffer in
/// tests). Unlike the interactive display, every live cache is printed.
pub fn run_once<F: FileSystem, W: Write>(
    collector: &SlabCollector<F>,
    nodes: &mut SlabNodes,
    sort: SortField,
    out: &mut W,
) -> Result<(), CollectError> {
    let summary = collector.summary()?;
    collector.fill(nodes)?;
    sort_caches(sort, nodes.caches_mut());

    for line in fmt::summary_lines(&summary) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", fmt::header_line())?;
    for cache in nodes.caches() {
        writeln!(out, "{}", fmt::cache_line(cache))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;

    fn run(fs: MockFs, sort: SortField) -> Vec<String> {
        let collector = SlabCollector::open(fs, "/proc").unwrap();
        let mut nodes = SlabNodes::default();
        let mut out = Vec::new();
        run_once(&collector, &mut nodes, sort, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn prints_summary_header_and_sorted_rows() {
        let lines = run(MockFs::typical_system(), SortField::Objects);

        // 5 summary lines, separator, header, one row per cache
        assert_eq!(lines.len(), 5 + 1 + 1 + 6);
        assert!(lines[0].starts_with(" Active / Total Objects"));
        assert!(lines[5].is_empty());
        assert!(lines[6].starts_with("  OBJS ACTIVE"));

        // descending object count: dentry (128121) leads
        assert!(lines[7].contains("dentry"));
        let objs: Vec<u64> = lines[7..]
            .iter()
            .map(|l| l.split_whitespace().next().unwrap().parse().unwrap())
            .collect();
        assert!(objs.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn name_sort_prints_rows_ascending() {
        let lines = run(MockFs::typical_system(), SortField::Name);
        let names: Vec<String> = lines[7..]
            .iter()
            .map(|l| l.split_whitespace().last().unwrap().to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn empty_source_prints_no_rows() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/slabinfo", "slabinfo - version: 2.1\n");
        let lines = run(fs, SortField::Objects);
        assert_eq!(lines.len(), 5 + 1 + 1);
        assert!(lines[6].starts_with("  OBJS ACTIVE"));
    }
}
