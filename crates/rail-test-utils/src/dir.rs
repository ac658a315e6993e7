//! [`TestDir`] builder for directories of test files.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory of test files.
///
/// # Example
///
/// ```rust,no_run
/// use rail_test_utils::dir::TestDir;
///
/// let dir = TestDir::new().with_files(&["login.t", "api/users.t"]);
/// assert!(dir.resolved("api/users.t").ends_with("users.t"));
/// ```
pub struct TestDir {
    temp_dir: TempDir,
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `path` (relative to root).
    pub fn path(&self, path: &str) -> PathBuf {
        self.root().join(path)
    }

    /// Write `content` to `path` (relative to root), creating parents.
    pub fn write(&self, path: &str, content: &str) -> &Self {
        let full_path = self.path(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        self
    }

    /// Create each file in `paths` with placeholder content.
    pub fn with_files(self, paths: &[&str]) -> Self {
        for path in paths {
            self.write(path, "ok 1\n");
        }
        self
    }

    /// Canonical absolute form of `path` (relative to root), as the matcher
    /// reports it.
    pub fn resolved(&self, path: &str) -> String {
        dunce::canonicalize(self.path(path))
            .unwrap()
            .to_string_lossy()
            .into_owned()
    }
}
