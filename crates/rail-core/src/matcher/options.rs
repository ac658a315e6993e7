//! Options for the file matcher

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Error;

/// What to report about a directory of test files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// No directory: records are returned untouched.
    #[default]
    PassThrough,
    /// Records that have a file.
    Match(PathBuf),
    /// Files that have no record.
    NoMatch(PathBuf),
    /// Records that have no file.
    Orphans(PathBuf),
}

impl MatchMode {
    pub fn directory(&self) -> Option<&Path> {
        match self {
            MatchMode::PassThrough => None,
            MatchMode::Match(dir) | MatchMode::NoMatch(dir) | MatchMode::Orphans(dir) => {
                Some(dir.as_path())
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MatchMode::PassThrough => "pass-through",
            MatchMode::Match(_) => "match",
            MatchMode::NoMatch(_) => "no-match",
            MatchMode::Orphans(_) => "orphans",
        }
    }
}

/// Validated options for [`find_tests`](super::find_tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOptions {
    pub mode: MatchMode,
    /// Walk subdirectories instead of listing one level.
    pub recursive: bool,
    /// Emit names (paths or titles) instead of records.
    pub names_only: bool,
    /// File name suffix filter. Empty accepts every file.
    pub extension: String,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            mode: MatchMode::PassThrough,
            recursive: true,
            names_only: false,
            extension: String::new(),
        }
    }
}

impl MatchOptions {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn flat(mut self) -> Self {
        self.recursive = false;
        self
    }

    pub fn names_only(mut self) -> Self {
        self.names_only = true;
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Flag-style form of [`MatchOptions`], as found in option files.
///
/// Each mode is an independent optional directory, so nothing stops a file
/// from setting two of them. Converting with `MatchOptions::try_from`
/// rejects that before any scanning happens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MatchFlags {
    #[serde(rename = "match")]
    pub match_dir: Option<PathBuf>,
    pub no_match: Option<PathBuf>,
    pub orphans: Option<PathBuf>,
    pub no_recurse: bool,
    pub names_only: bool,
    pub extension: String,
}

impl TryFrom<MatchFlags> for MatchOptions {
    type Error = Error;

    fn try_from(flags: MatchFlags) -> Result<Self, Self::Error> {
        let mut modes = Vec::new();
        if let Some(dir) = flags.match_dir {
            modes.push(MatchMode::Match(dir));
        }
        if let Some(dir) = flags.no_match {
            modes.push(MatchMode::NoMatch(dir));
        }
        if let Some(dir) = flags.orphans {
            modes.push(MatchMode::Orphans(dir));
        }

        if modes.len() > 1 {
            return Err(Error::ConflictingModes {
                modes: modes.iter().map(MatchMode::name).collect(),
            });
        }

        Ok(Self {
            mode: modes.pop().unwrap_or_default(),
            recursive: !flags.no_recurse,
            names_only: flags.names_only,
            extension: flags.extension,
        })
    }
}
