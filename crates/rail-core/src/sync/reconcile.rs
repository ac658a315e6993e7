//! Three-way classification of cases against a directory

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::matcher::{MatchMode, MatchOptions, MatchOutput, find_tests};
use crate::model::Case;

fn default_recursive() -> bool {
    true
}

/// Where the test files live and how to scan them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReconcileOptions {
    pub directory: PathBuf,
    #[serde(default = "default_recursive")]
    pub recursive: bool,
    #[serde(default)]
    pub extension: String,
    /// Carried into the [`Reconciliation`] for the synchronizer.
    #[serde(default)]
    pub dry_run: bool,
}

impl ReconcileOptions {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            recursive: true,
            extension: String::new(),
            dry_run: false,
        }
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn flat(mut self) -> Self {
        self.recursive = false;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn matcher(&self, mode: MatchMode) -> MatchOptions {
        MatchOptions {
            mode,
            recursive: self.recursive,
            names_only: false,
            extension: self.extension.clone(),
        }
    }
}

/// Cases to create, delete and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Files without a case. Titles are file paths.
    #[serde(default)]
    pub missing: Vec<Case>,
    /// Cases without a file.
    #[serde(default)]
    pub orphans: Vec<Case>,
    /// Cases with a file, `full_title` set to its absolute path.
    #[serde(default)]
    pub update: Vec<Case>,
    #[serde(default)]
    pub dry_run: bool,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.orphans.is_empty() && self.update.is_empty()
    }
}

/// Classify `cases` against `options.directory`.
///
/// Every case lands in exactly one of `update` and `orphans`; `missing`
/// only holds pseudo-cases for files.
pub fn reconcile(options: &ReconcileOptions, cases: Vec<Case>) -> Result<Reconciliation> {
    let dir = &options.directory;

    let update = records(find_tests(
        &options.matcher(MatchMode::Match(dir.clone())),
        cases.clone(),
    )?);
    let orphans = records(find_tests(
        &options.matcher(MatchMode::Orphans(dir.clone())),
        cases.clone(),
    )?);
    let missing = records(find_tests(
        &options.matcher(MatchMode::NoMatch(dir.clone())),
        cases,
    )?);

    debug!(
        dir = %dir.display(),
        update = update.len(),
        orphans = orphans.len(),
        missing = missing.len(),
        "reconciled cases"
    );

    Ok(Reconciliation {
        missing,
        orphans,
        update,
        dry_run: options.dry_run,
    })
}

fn records(output: MatchOutput<Case>) -> Vec<Case> {
    output.into_records().unwrap_or_default()
}
