//! Records exchanged with the test-management service
//!
//! Every record is transient: fetched per call, filtered and sorted locally,
//! never persisted. Timestamps are Unix seconds as the service reports them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field-value map accepted by case create and update calls.
pub type CaseFields = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

/// A test plan grouping child runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: u64,
    pub name: String,
    pub created_on: i64,
    #[serde(default)]
    pub milestone_id: Option<u64>,
    /// Child runs. Plan listings leave this empty; fetching a plan by id
    /// fills it in.
    #[serde(default)]
    pub runs: Vec<Run>,
}

/// A test run, either standalone or owned by a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub config_ids: Vec<u64>,
    pub created_on: i64,
    #[serde(default)]
    pub milestone_id: Option<u64>,
    #[serde(default)]
    pub plan_id: Option<u64>,
    /// Due date of the run's milestone, filled in only for milestone sorting.
    #[serde(default)]
    pub due_on: i64,
    /// Aggregate status counts, filled in only when filtering by status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_status: Option<RunStatus>,
}

impl Run {
    pub fn new(id: u64, name: impl Into<String>, created_on: i64) -> Self {
        Self {
            id,
            name: name.into(),
            config_ids: Vec::new(),
            created_on,
            milestone_id: None,
            plan_id: None,
            due_on: 0,
            run_status: None,
        }
    }

    pub fn with_configs(mut self, config_ids: impl IntoIterator<Item = u64>) -> Self {
        self.config_ids = config_ids.into_iter().collect();
        self
    }

    pub fn with_milestone(mut self, milestone_id: u64) -> Self {
        self.milestone_id = Some(milestone_id);
        self
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_on, 0)
    }

    /// True when this run's config ids are exactly the `requested` set.
    ///
    /// The cardinalities must agree and every one of the run's ids must be
    /// requested. Config ids are unique per run, so this is set equality.
    pub fn has_exact_configs(&self, requested: &[u64]) -> bool {
        if self.config_ids.len() != requested.len() {
            return false;
        }
        let contained = self
            .config_ids
            .iter()
            .filter(|id| requested.contains(id))
            .count();
        contained == self.config_ids.len()
    }

    /// Copy the owning plan's creation date and milestone onto this run.
    pub(crate) fn inherit_from(&mut self, plan: &Plan) {
        self.created_on = plan.created_on;
        self.milestone_id = plan.milestone_id;
        self.plan_id = Some(plan.id);
    }
}

/// Aggregate result counts of a run, keyed by provider status label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunStatus(BTreeMap<String, u64>);

impl RunStatus {
    pub fn count(&self, label: &str) -> u64 {
        self.0.get(label).copied().unwrap_or(0)
    }

    /// A label is satisfied when at least one test in the run carries it.
    pub fn satisfies(&self, label: &str) -> bool {
        self.count(label) > 0
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for RunStatus {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub due_on: Option<i64>,
}

impl Milestone {
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_on.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub suite_id: Option<u64>,
}

/// Record that can be matched against files on disk.
///
/// Implemented by suite-level [`Case`]s and run-level [`Test`]s so the file
/// matcher works on either.
pub trait CaseRecord: Clone {
    fn title(&self) -> &str;

    /// Pseudo-record standing in for a file that has no record.
    fn from_title(title: String) -> Self;

    fn path(&self) -> Option<&Path>;

    fn set_path(&mut self, path: PathBuf);

    fn full_title(&self) -> Option<&str>;

    fn set_full_title(&mut self, full_title: String);
}

/// Suite-level test case definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub section_id: Option<u64>,
    #[serde(default)]
    pub type_id: Option<u64>,
    /// Absolute path of the matching file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_title: Option<String>,
    /// Path of the matching file as scanned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Case {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            ..Self::default()
        }
    }
}

impl CaseRecord for Case {
    fn title(&self) -> &str {
        &self.title
    }

    fn from_title(title: String) -> Self {
        Self {
            title,
            ..Self::default()
        }
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    fn full_title(&self) -> Option<&str> {
        self.full_title.as_deref()
    }

    fn set_full_title(&mut self, full_title: String) {
        self.full_title = Some(full_title);
    }
}

/// A case instantiated within a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub case_id: Option<u64>,
    #[serde(default)]
    pub run_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub status_id: Option<u64>,
    #[serde(default)]
    pub assignedto_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl CaseRecord for Test {
    fn title(&self) -> &str {
        &self.title
    }

    fn from_title(title: String) -> Self {
        Self {
            title,
            ..Self::default()
        }
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    fn full_title(&self) -> Option<&str> {
        self.full_title.as_deref()
    }

    fn set_full_title(&mut self, full_title: String) {
        self.full_title = Some(full_title);
    }
}
