//! Enumeration of on-disk test files
//!
//! Two strategies, chosen by [`ScanOptions::recursive`]:
//!
//! - **recursive**: depth-first walk of the whole tree, keeping files whose
//!   name ends with the extension filter
//! - **flat**: single-level listing of the directory, keeping files matching
//!   the glob `*{extension}`
//!
//! Both keep symlinks that point at files. Symlinked directories are not
//! descended into.
//!
//! Entries are visited in file-name order within each directory, so a given
//! tree always enumerates the same way.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::{Error, Result, base_name};

/// How a directory is enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// File name suffix filter. Empty accepts every file.
    pub extension: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            extension: String::new(),
        }
    }
}

impl ScanOptions {
    pub fn recursive(extension: impl Into<String>) -> Self {
        Self {
            recursive: true,
            extension: extension.into(),
        }
    }

    pub fn flat(extension: impl Into<String>) -> Self {
        Self {
            recursive: false,
            extension: extension.into(),
        }
    }
}

/// List the files under `dir` according to `options`.
///
/// # Errors
///
/// Returns [`Error::Io`] if `dir` does not exist, is not a directory, or an
/// entry cannot be read, and [`Error::InvalidPattern`] if the extension
/// cannot be turned into a glob.
pub fn scan_files(dir: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(dir).map_err(|e| Error::io(dir, e))?;
    if !metadata.is_dir() {
        return Err(Error::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let files = if options.recursive {
        walk(dir, &options.extension)?
    } else {
        list(dir, &options.extension)?
    };

    tracing::debug!(
        dir = %dir.display(),
        recursive = options.recursive,
        extension = %options.extension,
        count = files.len(),
        "scanned test files"
    );
    Ok(files)
}

fn walk(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::io(path, e.into())
        })?;
        // Same rule as the flat listing: symlinks to files count, the
        // target's type decides.
        if !entry.path().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(extension) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn list(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let matcher = extension_glob(extension)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && matcher.is_match(base_name(&path)) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn extension_glob(extension: &str) -> Result<GlobMatcher> {
    let pattern = format!("*{}", globset::escape(extension));
    let glob = GlobBuilder::new(&pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
    Ok(glob.compile_matcher())
}
