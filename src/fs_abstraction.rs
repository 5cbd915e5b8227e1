//! Filesystem abstraction layer for testability
//!
//! Adjustment rules may pull in further rule files with `@path`. Reading those
//! goes through [`FileSystem`] so the recursion can be exercised against a
//! mock in tests. Uses mockall for automatic mock generation in test builds.

use std::io;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

/// Trait abstracting the filesystem reads needed by the rule parser.
///
/// # Example (production)
/// ```ignore
/// use blackhole::fs_abstraction::{FileSystem, real_fs};
///
/// let content = real_fs().read_to_string(Path::new("/etc/blackhole/excludes.txt"))?;
/// ```
///
/// # Example (testing)
/// ```ignore
/// use blackhole::fs_abstraction::MockFileSystem;
///
/// let mut mock_fs = MockFileSystem::new();
/// mock_fs.expect_read_to_string()
///     .returning(|_| Ok("ads.example.com".to_string()));
/// ```
#[cfg_attr(test, automock)]
pub trait FileSystem: Send + Sync {
    /// Read file contents as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Resolve a path to its canonical absolute form, following symlinks.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation using std::fs.
#[derive(Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

static REAL_FS: RealFileSystem = RealFileSystem;

/// Get a reference to the global real filesystem instance.
///
/// For testing, create a `MockFileSystem` instead.
pub fn real_fs() -> &'static RealFileSystem {
    &REAL_FS
}
