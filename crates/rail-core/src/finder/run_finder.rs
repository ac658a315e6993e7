//! Run discovery, filtering and ordering

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::client::ServiceClient;
use crate::error::{EntityKind, Error};
use crate::model::Run;
use crate::Result;

/// Direction of the final sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Oldest / earliest first.
    #[default]
    Fifo,
    /// Newest / latest first.
    Lifo,
}

/// Key the runs are sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Creation date of the run, or of its plan for plan-child runs.
    #[default]
    CreatedOn,
    /// Due date of the run's milestone, 0 for runs without one.
    MilestoneDue,
}

/// Filter criteria for [`RunFinder::find_runs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunQuery {
    pub project: String,
    /// Status names a run must all have results for.
    #[serde(default)]
    pub statuses: Vec<String>,
    /// Config names a run must carry exactly.
    #[serde(default)]
    pub configs: Vec<String>,
    #[serde(default)]
    pub order: Order,
    #[serde(default)]
    pub sort_by: SortKey,
}

impl RunQuery {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Self::default()
        }
    }

    pub fn statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    pub fn configs<I, S>(mut self, configs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configs = configs.into_iter().map(Into::into).collect();
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_by = key;
        self
    }
}

/// Locates the runs of a project, standalone or nested in plans.
pub struct RunFinder<'a> {
    client: &'a dyn ServiceClient,
}

impl<'a> RunFinder<'a> {
    pub fn new(client: &'a dyn ServiceClient) -> Self {
        Self { client }
    }

    /// Find, filter and order the runs described by `query`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotFound`] if the project does not exist, and
    /// propagates translation failures for unknown status or config names
    /// before any run is fetched.
    pub fn find_runs(&self, query: &RunQuery) -> Result<Vec<Run>> {
        let project = self
            .client
            .project_by_name(&query.project)?
            .ok_or_else(|| Error::not_found(EntityKind::Project, &query.project))?;

        let labels = if query.statuses.is_empty() {
            Vec::new()
        } else {
            self.client.status_labels(&query.statuses)?
        };

        let config_ids = if query.configs.is_empty() {
            None
        } else {
            Some(self.client.config_ids(project.id, &query.configs)?)
        };

        let mut runs = self.collect_candidates(project.id, config_ids.as_deref())?;
        debug!(project = %project.name, candidates = runs.len(), "collected runs");

        if !labels.is_empty() {
            runs = self.filter_by_status(runs, &labels)?;
        }

        if query.sort_by == SortKey::MilestoneDue {
            self.attach_due_dates(&mut runs)?;
        }
        sort_runs(&mut runs, query.sort_by, query.order);

        debug!(
            project = %project.name,
            count = runs.len(),
            order = ?query.order,
            sort_by = ?query.sort_by,
            "runs found"
        );
        Ok(runs)
    }

    /// Standalone runs (only without a config filter) followed by the
    /// qualifying child runs of every plan.
    ///
    /// Child runs always need a config set equal to the requested one, so
    /// without a filter only config-less child runs qualify.
    fn collect_candidates(&self, project_id: u64, config_ids: Option<&[u64]>) -> Result<Vec<Run>> {
        let mut runs = match config_ids {
            None => self.client.runs(project_id)?,
            Some(_) => Vec::new(),
        };
        let requested = config_ids.unwrap_or(&[]);

        for listed in self.client.plans(project_id)? {
            let plan = self.client.plan(listed.id)?;
            for run in &plan.runs {
                if !run.has_exact_configs(requested) {
                    debug!(run = run.id, plan = plan.id, "config set differs, skipping plan run");
                    continue;
                }
                let mut run = run.clone();
                run.inherit_from(&plan);
                runs.push(run);
            }
        }

        Ok(runs)
    }

    /// Keep runs with a positive count for every label.
    fn filter_by_status(&self, runs: Vec<Run>, labels: &[String]) -> Result<Vec<Run>> {
        let mut statuses = self.client.run_statuses(&runs)?;

        let kept: Vec<Run> = runs
            .into_iter()
            .filter_map(|mut run| {
                let Some(status) = statuses.remove(&run.id) else {
                    debug!(run = run.id, "no status summary, dropping run");
                    return None;
                };
                if !labels.iter().all(|label| status.satisfies(label)) {
                    return None;
                }
                run.run_status = Some(status);
                Some(run)
            })
            .collect();

        Ok(kept)
    }

    /// Set `due_on` from each run's milestone, fetching every milestone once.
    fn attach_due_dates(&self, runs: &mut [Run]) -> Result<()> {
        let mut due_dates: HashMap<u64, i64> = HashMap::new();

        for run in runs.iter_mut() {
            run.due_on = match run.milestone_id {
                None => 0,
                Some(id) => match due_dates.get(&id) {
                    Some(due) => *due,
                    None => {
                        let milestone = self.client.milestone(id)?;
                        debug!(
                            milestone = id,
                            due = ?milestone.due_at(),
                            "fetched milestone"
                        );
                        let due = milestone.due_on.unwrap_or(0);
                        due_dates.insert(id, due);
                        due
                    }
                },
            };
        }

        Ok(())
    }
}

/// Stable sort by the chosen key. Ties keep their collection order.
fn sort_runs(runs: &mut [Run], key: SortKey, order: Order) {
    let key_of = |run: &Run| match key {
        SortKey::CreatedOn => run.created_on,
        SortKey::MilestoneDue => run.due_on,
    };
    match order {
        Order::Fifo => runs.sort_by_key(key_of),
        Order::Lifo => runs.sort_by(|a, b| key_of(b).cmp(&key_of(a))),
    }
}
