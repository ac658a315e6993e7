//! Path helpers shared by the scanner and the matcher

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Base file name of a path as a string.
///
/// Returns an empty string for paths without a final component (`/`, `..`).
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Resolve a path to an absolute, symlink-free form.
///
/// Uses `dunce` so Windows results are plain `C:\...` paths rather than
/// verbatim `\\?\` paths.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Path::new("specs/login/a.t")), "a.t");
        assert_eq!(base_name(Path::new("a.t")), "a.t");
        assert_eq!(base_name(Path::new("/")), "");
    }

    #[test]
    fn test_absolute_missing_path_is_io_error() {
        let err = absolute(Path::new("definitely/not/here.t")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
