//! In-memory [`ServiceClient`] for tests.
//!
//! [`FakeService`] is populated with a builder, serves lookups from memory,
//! applies case mutations to its own state and records every call so tests
//! can assert on what was (or was not) sent to the service.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use rail_core::error::{EntityKind, Error};
use rail_core::{
    Case, CaseFields, ConfigItem, Milestone, Plan, Project, Result, Run, RunStatus, Section,
    ServiceClient, Suite, Test,
};

/// A call received by [`FakeService`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ProjectByName(String),
    Plans(u64),
    Plan(u64),
    Runs(u64),
    RunStatuses(Vec<u64>),
    Milestone(u64),
    StatusLabels(Vec<String>),
    StatusIds(Vec<String>),
    ConfigIds(u64, Vec<String>),
    UserIds(Vec<String>),
    Tests {
        run_id: u64,
        status_ids: Vec<u64>,
        user_ids: Vec<u64>,
    },
    SuiteByName(u64, String),
    SectionByName(u64, String),
    CaseTypeIds(Vec<String>),
    Cases {
        suite_id: u64,
        section_id: Option<u64>,
        type_ids: Vec<u64>,
    },
    AddCase {
        section_id: u64,
        fields: CaseFields,
    },
    UpdateCase {
        case_id: u64,
        fields: CaseFields,
    },
    DeleteCase(u64),
}

impl Call {
    /// Whether this call changes service state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::AddCase { .. } | Call::UpdateCase { .. } | Call::DeleteCase(_)
        )
    }

    fn op(&self) -> &'static str {
        match self {
            Call::ProjectByName(_) => "project_by_name",
            Call::Plans(_) => "plans",
            Call::Plan(_) => "plan",
            Call::Runs(_) => "runs",
            Call::RunStatuses(_) => "run_statuses",
            Call::Milestone(_) => "milestone",
            Call::StatusLabels(_) => "status_labels",
            Call::StatusIds(_) => "status_ids",
            Call::ConfigIds(..) => "config_ids",
            Call::UserIds(_) => "user_ids",
            Call::Tests { .. } => "tests",
            Call::SuiteByName(..) => "suite_by_name",
            Call::SectionByName(..) => "section_by_name",
            Call::CaseTypeIds(_) => "case_type_ids",
            Call::Cases { .. } => "cases",
            Call::AddCase { .. } => "add_case",
            Call::UpdateCase { .. } => "update_case",
            Call::DeleteCase(_) => "delete_case",
        }
    }
}

struct StatusDef {
    name: String,
    label: String,
    id: u64,
}

/// In-memory test-management service.
#[derive(Default)]
pub struct FakeService {
    projects: Vec<Project>,
    plans: Vec<(u64, Plan)>,
    runs: Vec<(u64, Run)>,
    run_statuses: HashMap<u64, RunStatus>,
    milestones: Vec<Milestone>,
    statuses: Vec<StatusDef>,
    configs: Vec<(u64, ConfigItem)>,
    users: Vec<(String, u64)>,
    tests: Vec<Test>,
    suites: Vec<(u64, Suite)>,
    sections: Vec<Section>,
    case_types: Vec<(String, u64)>,
    cases: RefCell<Vec<(u64, Case)>>,
    next_case_id: Cell<u64>,
    failing: HashSet<&'static str>,
    calls: RefCell<Vec<Call>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            next_case_id: Cell::new(1000),
            ..Self::default()
        }
    }

    pub fn with_project(mut self, id: u64, name: &str) -> Self {
        self.projects.push(Project {
            id,
            name: name.to_string(),
        });
        self
    }

    /// Add a plan with its child runs. Listing plans hides the runs; fetching
    /// the plan by id returns them.
    pub fn with_plan(mut self, project_id: u64, plan: Plan) -> Self {
        self.plans.push((project_id, plan));
        self
    }

    /// Add a standalone run.
    pub fn with_run(mut self, project_id: u64, run: Run) -> Self {
        self.runs.push((project_id, run));
        self
    }

    pub fn with_run_status(mut self, run_id: u64, status: RunStatus) -> Self {
        self.run_statuses.insert(run_id, status);
        self
    }

    pub fn with_milestone(mut self, id: u64, due_on: Option<i64>) -> Self {
        self.milestones.push(Milestone {
            id,
            name: format!("Milestone {id}"),
            due_on,
        });
        self
    }

    /// Register a status `name`, the summary `label` it maps to and its id.
    pub fn with_status(mut self, name: &str, label: &str, id: u64) -> Self {
        self.statuses.push(StatusDef {
            name: name.to_string(),
            label: label.to_string(),
            id,
        });
        self
    }

    pub fn with_config(mut self, project_id: u64, id: u64, name: &str) -> Self {
        self.configs.push((
            project_id,
            ConfigItem {
                id,
                name: name.to_string(),
            },
        ));
        self
    }

    pub fn with_user(mut self, name: &str, id: u64) -> Self {
        self.users.push((name.to_string(), id));
        self
    }

    pub fn with_test(mut self, test: Test) -> Self {
        self.tests.push(test);
        self
    }

    pub fn with_suite(mut self, project_id: u64, id: u64, name: &str) -> Self {
        self.suites.push((
            project_id,
            Suite {
                id,
                name: name.to_string(),
            },
        ));
        self
    }

    pub fn with_section(mut self, suite_id: u64, id: u64, name: &str) -> Self {
        self.sections.push(Section {
            id,
            name: name.to_string(),
            suite_id: Some(suite_id),
        });
        self
    }

    pub fn with_case_type(mut self, name: &str, id: u64) -> Self {
        self.case_types.push((name.to_string(), id));
        self
    }

    pub fn with_case(self, suite_id: u64, case: Case) -> Self {
        self.cases.borrow_mut().push((suite_id, case));
        self
    }

    /// Make every call to `op` (a [`ServiceClient`] method name) fail with
    /// [`Error::Client`].
    pub fn failing(mut self, op: &'static str) -> Self {
        self.failing.insert(op);
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls that would have changed service state.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    /// Number of calls to `op`.
    pub fn count(&self, op: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.op() == op).count()
    }

    /// Current cases of a suite, after any mutations.
    pub fn cases_in(&self, suite_id: u64) -> Vec<Case> {
        self.cases
            .borrow()
            .iter()
            .filter(|(suite, _)| *suite == suite_id)
            .map(|(_, case)| case.clone())
            .collect()
    }

    fn record(&self, call: Call) -> Result<()> {
        let op = call.op();
        self.calls.borrow_mut().push(call);
        if self.failing.contains(op) {
            return Err(Error::client(format!("injected failure in {op}")));
        }
        Ok(())
    }

    fn translate<T: Clone>(
        kind: EntityKind,
        names: &[String],
        lookup: impl Fn(&str) -> Option<T>,
    ) -> Result<Vec<T>> {
        names
            .iter()
            .map(|name| lookup(name).ok_or_else(|| Error::unknown(kind, name)))
            .collect()
    }
}

impl ServiceClient for FakeService {
    fn project_by_name(&self, name: &str) -> Result<Option<Project>> {
        self.record(Call::ProjectByName(name.to_string()))?;
        Ok(self.projects.iter().find(|p| p.name == name).cloned())
    }

    fn plans(&self, project_id: u64) -> Result<Vec<Plan>> {
        self.record(Call::Plans(project_id))?;
        Ok(self
            .plans
            .iter()
            .filter(|(project, _)| *project == project_id)
            .map(|(_, plan)| Plan {
                runs: Vec::new(),
                ..plan.clone()
            })
            .collect())
    }

    fn plan(&self, plan_id: u64) -> Result<Plan> {
        self.record(Call::Plan(plan_id))?;
        self.plans
            .iter()
            .map(|(_, plan)| plan)
            .find(|plan| plan.id == plan_id)
            .cloned()
            .ok_or_else(|| Error::client(format!("no plan {plan_id}")))
    }

    fn runs(&self, project_id: u64) -> Result<Vec<Run>> {
        self.record(Call::Runs(project_id))?;
        Ok(self
            .runs
            .iter()
            .filter(|(project, _)| *project == project_id)
            .map(|(_, run)| run.clone())
            .collect())
    }

    fn run_statuses(&self, runs: &[Run]) -> Result<HashMap<u64, RunStatus>> {
        self.record(Call::RunStatuses(runs.iter().map(|r| r.id).collect()))?;
        Ok(runs
            .iter()
            .filter_map(|run| {
                self.run_statuses
                    .get(&run.id)
                    .map(|status| (run.id, status.clone()))
            })
            .collect())
    }

    fn milestone(&self, milestone_id: u64) -> Result<Milestone> {
        self.record(Call::Milestone(milestone_id))?;
        self.milestones
            .iter()
            .find(|m| m.id == milestone_id)
            .cloned()
            .ok_or_else(|| Error::client(format!("no milestone {milestone_id}")))
    }

    fn status_labels(&self, names: &[String]) -> Result<Vec<String>> {
        self.record(Call::StatusLabels(names.to_vec()))?;
        Self::translate(EntityKind::Status, names, |name| {
            self.statuses
                .iter()
                .find(|s| s.name == name)
                .map(|s| s.label.clone())
        })
    }

    fn status_ids(&self, names: &[String]) -> Result<Vec<u64>> {
        self.record(Call::StatusIds(names.to_vec()))?;
        Self::translate(EntityKind::Status, names, |name| {
            self.statuses.iter().find(|s| s.name == name).map(|s| s.id)
        })
    }

    fn config_ids(&self, project_id: u64, names: &[String]) -> Result<Vec<u64>> {
        self.record(Call::ConfigIds(project_id, names.to_vec()))?;
        Self::translate(EntityKind::Config, names, |name| {
            self.configs
                .iter()
                .find(|(project, config)| *project == project_id && config.name == name)
                .map(|(_, config)| config.id)
        })
    }

    fn user_ids(&self, names: &[String]) -> Result<Vec<u64>> {
        self.record(Call::UserIds(names.to_vec()))?;
        Self::translate(EntityKind::User, names, |name| {
            self.users.iter().find(|(n, _)| n == name).map(|(_, id)| *id)
        })
    }

    fn tests(&self, run_id: u64, status_ids: &[u64], user_ids: &[u64]) -> Result<Vec<Test>> {
        self.record(Call::Tests {
            run_id,
            status_ids: status_ids.to_vec(),
            user_ids: user_ids.to_vec(),
        })?;
        Ok(self
            .tests
            .iter()
            .filter(|t| t.run_id == Some(run_id))
            .filter(|t| {
                status_ids.is_empty() || t.status_id.is_some_and(|s| status_ids.contains(&s))
            })
            .filter(|t| {
                user_ids.is_empty() || t.assignedto_id.is_some_and(|u| user_ids.contains(&u))
            })
            .cloned()
            .collect())
    }

    fn suite_by_name(&self, project_id: u64, name: &str) -> Result<Option<Suite>> {
        self.record(Call::SuiteByName(project_id, name.to_string()))?;
        Ok(self
            .suites
            .iter()
            .find(|(project, suite)| *project == project_id && suite.name == name)
            .map(|(_, suite)| suite.clone()))
    }

    fn section_by_name(
        &self,
        _project_id: u64,
        suite_id: u64,
        name: &str,
    ) -> Result<Option<Section>> {
        self.record(Call::SectionByName(suite_id, name.to_string()))?;
        Ok(self
            .sections
            .iter()
            .find(|s| s.suite_id == Some(suite_id) && s.name == name)
            .cloned())
    }

    fn case_type_ids(&self, names: &[String]) -> Result<Vec<u64>> {
        self.record(Call::CaseTypeIds(names.to_vec()))?;
        Self::translate(EntityKind::CaseType, names, |name| {
            self.case_types
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, id)| *id)
        })
    }

    fn cases(
        &self,
        _project_id: u64,
        suite_id: u64,
        section_id: Option<u64>,
        type_ids: &[u64],
    ) -> Result<Vec<Case>> {
        self.record(Call::Cases {
            suite_id,
            section_id,
            type_ids: type_ids.to_vec(),
        })?;
        Ok(self
            .cases_in(suite_id)
            .into_iter()
            .filter(|c| section_id.is_none() || c.section_id == section_id)
            .filter(|c| type_ids.is_empty() || c.type_id.is_some_and(|t| type_ids.contains(&t)))
            .collect())
    }

    fn add_case(&self, section_id: u64, fields: &CaseFields) -> Result<Case> {
        self.record(Call::AddCase {
            section_id,
            fields: fields.clone(),
        })?;

        let suite_id = self
            .sections
            .iter()
            .find(|s| s.id == section_id)
            .and_then(|s| s.suite_id)
            .ok_or_else(|| Error::client(format!("no section {section_id}")))?;
        let title = fields
            .get("title")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::client("title is required"))?;

        let id = self.next_case_id.get();
        self.next_case_id.set(id + 1);
        let case = Case {
            section_id: Some(section_id),
            ..Case::new(id, title)
        };
        self.cases.borrow_mut().push((suite_id, case.clone()));
        Ok(case)
    }

    fn update_case(&self, case_id: u64, fields: &CaseFields) -> Result<Case> {
        self.record(Call::UpdateCase {
            case_id,
            fields: fields.clone(),
        })?;
        self.cases
            .borrow()
            .iter()
            .map(|(_, case)| case)
            .find(|case| case.id == Some(case_id))
            .cloned()
            .ok_or_else(|| Error::client(format!("no case {case_id}")))
    }

    fn delete_case(&self, case_id: u64) -> Result<()> {
        self.record(Call::DeleteCase(case_id))?;
        let mut cases = self.cases.borrow_mut();
        let before = cases.len();
        cases.retain(|(_, case)| case.id != Some(case_id));
        if cases.len() == before {
            return Err(Error::client(format!("no case {case_id}")));
        }
        Ok(())
    }
}
