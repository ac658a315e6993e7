//! Test lookup within a single resolved run

use serde::Deserialize;
use tracing::debug;

use crate::client::ServiceClient;
use crate::error::{EntityKind, Error};
use crate::model::{Project, Run, Test};
use crate::Result;

/// Identifies a run and filters its tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TestQuery {
    pub project: String,
    /// Plan owning the run. Without it the run is looked up among the
    /// project's standalone runs.
    #[serde(default)]
    pub plan: Option<String>,
    pub run: String,
    /// Picks between same-named child runs of a plan.
    #[serde(default)]
    pub configs: Vec<String>,
    #[serde(default)]
    pub statuses: Vec<String>,
    /// Usernames the tests must be assigned to.
    #[serde(default)]
    pub assignees: Vec<String>,
}

impl TestQuery {
    pub fn new(project: impl Into<String>, run: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            run: run.into(),
            ..Self::default()
        }
    }

    pub fn in_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    pub fn configs<I: IntoIterator<Item = S>, S: Into<String>>(mut self, configs: I) -> Self {
        self.configs = configs.into_iter().map(Into::into).collect();
        self
    }

    pub fn statuses<I: IntoIterator<Item = S>, S: Into<String>>(mut self, statuses: I) -> Self {
        self.statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    pub fn assignees<I: IntoIterator<Item = S>, S: Into<String>>(mut self, users: I) -> Self {
        self.assignees = users.into_iter().map(Into::into).collect();
        self
    }
}

/// Retrieves the tests of a run.
pub struct TestFinder<'a> {
    client: &'a dyn ServiceClient,
}

impl<'a> TestFinder<'a> {
    pub fn new(client: &'a dyn ServiceClient) -> Self {
        Self { client }
    }

    /// Resolve the run named by `query` and fetch its tests.
    ///
    /// Returns the tests together with the resolved run.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotFound`] when the project, plan or run cannot be
    /// resolved, and propagates status and user translation failures.
    pub fn get_tests(&self, query: &TestQuery) -> Result<(Vec<Test>, Run)> {
        let project = self
            .client
            .project_by_name(&query.project)?
            .ok_or_else(|| Error::not_found(EntityKind::Project, &query.project))?;

        let run = self.resolve_run(&project, query)?;

        let status_ids = if query.statuses.is_empty() {
            Vec::new()
        } else {
            self.client.status_ids(&query.statuses)?
        };
        let user_ids = if query.assignees.is_empty() {
            Vec::new()
        } else {
            self.client.user_ids(&query.assignees)?
        };

        let tests = self.client.tests(run.id, &status_ids, &user_ids)?;
        debug!(run = run.id, count = tests.len(), "tests found");
        Ok((tests, run))
    }

    fn resolve_run(&self, project: &Project, query: &TestQuery) -> Result<Run> {
        let Some(plan_name) = &query.plan else {
            return self
                .client
                .runs(project.id)?
                .into_iter()
                .find(|run| run.name == query.run)
                .ok_or_else(|| Error::not_found(EntityKind::Run, &query.run));
        };

        let listed = self
            .client
            .plans(project.id)?
            .into_iter()
            .find(|plan| &plan.name == plan_name)
            .ok_or_else(|| Error::not_found(EntityKind::Plan, plan_name))?;
        let plan = self.client.plan(listed.id)?;

        let config_ids = if query.configs.is_empty() {
            None
        } else {
            Some(self.client.config_ids(project.id, &query.configs)?)
        };

        let mut run = plan
            .runs
            .iter()
            .filter(|run| run.name == query.run)
            .find(|run| match &config_ids {
                Some(requested) => run.has_exact_configs(requested),
                None => true,
            })
            .cloned()
            .ok_or_else(|| Error::not_found(EntityKind::Run, &query.run))?;
        run.inherit_from(&plan);
        Ok(run)
    }
}
