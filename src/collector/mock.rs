//! In-memory mock filesystem for testing the collector without a real `/proc`.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::traits::FileSystem;

/// In-memory filesystem keyed by path.
///
/// Lets collector tests (and the binary on non-Linux platforms) simulate
/// arbitrary `/proc/slabinfo` states.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: HashMap<PathBuf, String>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files.insert(path.as_ref().to_path_buf(), content.into());
    }

    /// A small but realistic `/proc/slabinfo`, for demos and tests.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();
        fs.add_file(
            "/proc/slabinfo",
            "slabinfo - version: 2.1\n\
             # name            <active_objs> <num_objs> <objsize> <objperslab> <pagesperslab> : tunables <limit> <batchcount> <sharedfactor> : slabdata <active_slabs> <num_slabs> <sharedavail>\n\
             ext4_inode_cache   53568  54340   1176   27    8 : tunables    0    0    0 : slabdata   2013   2013      0\n\
             dentry            127890 128121    192   21    1 : tunables    0    0    0 : slabdata   6101   6101      0\n\
             buffer_head        42120  42120    104   39    1 : tunables    0    0    0 : slabdata   1080   1080      0\n\
             kmalloc-64         35072  35072     64   64    1 : tunables    0    0    0 : slabdata    548    548      0\n\
             inode_cache        15640  15980    632   25    4 : tunables    0    0    0 : slabdata    640    640      0\n\
             radix_tree_node    10136  10136    584   28    4 : tunables    0    0    0 : slabdata    362    362      0\n",
        );
        fs
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display())))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_fs_read_and_exists() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/slabinfo", "slabinfo - version: 2.1\n");
        assert!(fs.exists(Path::new("/proc/slabinfo")));
        assert!(!fs.exists(Path::new("/proc/meminfo")));
        let content = fs.read_to_string(Path::new("/proc/slabinfo")).unwrap();
        assert_eq!(content, "slabinfo - version: 2.1\n");
    }

    #[test]
    fn mock_fs_missing_file_is_not_found() {
        let fs = MockFs::new();
        let err = fs.read_to_string(Path::new("/proc/slabinfo")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
