//! Matching service records against test files on disk
//!
//! A record matches a file when its title equals the file's base name
//! exactly. The extension filter only narrows which files are scanned; it is
//! never stripped from titles before comparing.

mod options;

pub use options::{MatchFlags, MatchMode, MatchOptions};

use std::path::{Path, PathBuf};

use rail_fs::{ScanOptions, absolute, base_name, scan_files};
use tracing::debug;

use crate::Result;
use crate::model::CaseRecord;

/// Result of [`find_tests`], shaped by [`MatchOptions::names_only`].
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutput<C> {
    /// Paths for `Match`, titles for the other modes.
    Names(Vec<String>),
    Records(Vec<C>),
}

impl<C> MatchOutput<C> {
    pub fn len(&self) -> usize {
        match self {
            MatchOutput::Names(names) => names.len(),
            MatchOutput::Records(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_records(self) -> Option<Vec<C>> {
        match self {
            MatchOutput::Records(records) => Some(records),
            MatchOutput::Names(_) => None,
        }
    }

    pub fn into_names(self) -> Option<Vec<String>> {
        match self {
            MatchOutput::Names(names) => Some(names),
            MatchOutput::Records(_) => None,
        }
    }
}

/// Classify `cases` against the directory named by `options.mode`.
///
/// - `PassThrough`: the cases, unchanged
/// - `Match`: cases with a file, `path` and `full_title` attached
/// - `Orphans`: cases without a file
/// - `NoMatch`: files without a case, as pseudo-records titled by path
///
/// # Errors
///
/// Returns an error if the directory cannot be scanned or a matched file
/// cannot be resolved to an absolute path.
pub fn find_tests<C: CaseRecord>(options: &MatchOptions, cases: Vec<C>) -> Result<MatchOutput<C>> {
    let selected: Vec<C> = match &options.mode {
        MatchMode::PassThrough => return Ok(MatchOutput::Records(cases)),
        MatchMode::Match(dir) => {
            let scanned = Scanned::new(dir, options)?;
            cases
                .into_iter()
                .filter_map(|mut case| {
                    let index = scanned.position(case.title())?;
                    case.set_path(scanned.files[index].clone());
                    Some(case)
                })
                .collect()
        }
        MatchMode::Orphans(dir) => {
            let scanned = Scanned::new(dir, options)?;
            cases
                .into_iter()
                .filter(|case| scanned.position(case.title()).is_none())
                .collect()
        }
        MatchMode::NoMatch(dir) => {
            let scanned = Scanned::new(dir, options)?;
            scanned
                .files
                .iter()
                .zip(&scanned.names)
                .filter(|(_, name)| !cases.iter().any(|case| case.title() == name.as_str()))
                .map(|(file, _)| C::from_title(file.to_string_lossy().into_owned()))
                .collect()
        }
    };

    debug!(mode = options.mode.name(), selected = selected.len(), "matched test files");
    shape(options, selected)
}

/// Files found under a directory, with their base names.
struct Scanned {
    files: Vec<PathBuf>,
    names: Vec<String>,
}

impl Scanned {
    fn new(dir: &Path, options: &MatchOptions) -> Result<Self> {
        let scan = ScanOptions {
            recursive: options.recursive,
            extension: options.extension.clone(),
        };
        let files = scan_files(dir, &scan)?;
        let names = files.iter().map(|f| base_name(f)).collect();
        Ok(Self { files, names })
    }

    /// Index of the first file named exactly `title`.
    fn position(&self, title: &str) -> Option<usize> {
        self.names.iter().position(|name| name == title)
    }
}

fn shape<C: CaseRecord>(options: &MatchOptions, selected: Vec<C>) -> Result<MatchOutput<C>> {
    let is_match = matches!(options.mode, MatchMode::Match(_));

    match (is_match, options.names_only) {
        (true, true) => {
            let paths = selected
                .iter()
                .map(|case| resolved(case))
                .collect::<Result<Vec<_>>>()?;
            Ok(MatchOutput::Names(paths))
        }
        (true, false) => {
            let mut records = selected;
            for case in &mut records {
                let full = resolved(case)?;
                case.set_full_title(full);
            }
            Ok(MatchOutput::Records(records))
        }
        (false, true) => Ok(MatchOutput::Names(
            selected.iter().map(|case| case.title().to_string()).collect(),
        )),
        (false, false) => Ok(MatchOutput::Records(selected)),
    }
}

/// Absolute path of a matched record's file.
fn resolved<C: CaseRecord>(case: &C) -> Result<String> {
    let path = case
        .path()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(case.title()));
    let absolute = absolute(&path)?;
    Ok(absolute.to_string_lossy().into_owned())
}
