//! Service client abstraction
//!
//! The finders and the synchronizer never talk to the network themselves.
//! They receive a `&dyn ServiceClient` and issue blocking calls through it,
//! so the same code runs against a real API client or an in-memory fake.

use std::collections::HashMap;

use crate::Result;
use crate::model::{Case, CaseFields, Milestone, Plan, Project, Run, RunStatus, Section, Suite, Test};

/// Operations the test-management service must provide.
///
/// Lookups by name return `Ok(None)` when nothing matches; the caller turns
/// that into [`Error::NotFound`](crate::Error::NotFound). Translation methods
/// (`status_labels`, `status_ids`, `config_ids`, `user_ids`,
/// `case_type_ids`) should fail with
/// [`Error::UnknownName`](crate::Error::UnknownName) for names the service
/// does not know. Transport failures map to
/// [`Error::Client`](crate::Error::Client).
pub trait ServiceClient {
    /// Find a project by its exact name.
    fn project_by_name(&self, name: &str) -> Result<Option<Project>>;

    /// List the plans of a project. Child runs may be left empty.
    fn plans(&self, project_id: u64) -> Result<Vec<Plan>>;

    /// Fetch a single plan with its child runs.
    fn plan(&self, plan_id: u64) -> Result<Plan>;

    /// List the runs of a project that do not belong to a plan.
    fn runs(&self, project_id: u64) -> Result<Vec<Run>>;

    /// Aggregate status counts for a batch of runs, keyed by run id.
    ///
    /// Runs the service has no summary for are absent from the map.
    fn run_statuses(&self, runs: &[Run]) -> Result<HashMap<u64, RunStatus>>;

    fn milestone(&self, milestone_id: u64) -> Result<Milestone>;

    /// Translate status names to the labels used in [`RunStatus`].
    fn status_labels(&self, names: &[String]) -> Result<Vec<String>>;

    /// Translate status names to provider status ids.
    fn status_ids(&self, names: &[String]) -> Result<Vec<u64>>;

    /// Translate config names to ids within a project.
    fn config_ids(&self, project_id: u64, names: &[String]) -> Result<Vec<u64>>;

    /// Translate usernames to provider user ids.
    fn user_ids(&self, names: &[String]) -> Result<Vec<u64>>;

    /// Tests of a run. Empty id slices mean "no filter".
    fn tests(&self, run_id: u64, status_ids: &[u64], user_ids: &[u64]) -> Result<Vec<Test>>;

    fn suite_by_name(&self, project_id: u64, name: &str) -> Result<Option<Suite>>;

    fn section_by_name(&self, project_id: u64, suite_id: u64, name: &str)
    -> Result<Option<Section>>;

    /// Translate case type names to ids.
    fn case_type_ids(&self, names: &[String]) -> Result<Vec<u64>>;

    /// Cases of a suite, optionally narrowed to a section. Empty `type_ids`
    /// means every type.
    fn cases(
        &self,
        project_id: u64,
        suite_id: u64,
        section_id: Option<u64>,
        type_ids: &[u64],
    ) -> Result<Vec<Case>>;

    fn add_case(&self, section_id: u64, fields: &CaseFields) -> Result<Case>;

    fn update_case(&self, case_id: u64, fields: &CaseFields) -> Result<Case>;

    fn delete_case(&self, case_id: u64) -> Result<()>;
}
