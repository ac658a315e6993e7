//! Applying a reconciliation to the service

use std::path::Path;

use rail_fs::base_name;
use serde_json::json;
use tracing::info;

use crate::Result;
use crate::client::ServiceClient;
use crate::error::Error;
use crate::model::{Case, CaseFields};

use super::reconcile::Reconciliation;
use super::report::SyncReport;

/// Chooses the section a newly created case is filed under.
///
/// How on-disk layout maps to sections is deployment specific, so the
/// synchronizer asks this resolver instead of deciding itself. Closures
/// `Fn(&Case) -> Result<u64>` implement it.
pub trait SectionResolver {
    fn resolve_section(&self, case: &Case) -> Result<u64>;
}

impl<F> SectionResolver for F
where
    F: Fn(&Case) -> Result<u64>,
{
    fn resolve_section(&self, case: &Case) -> Result<u64> {
        self(case)
    }
}

/// Description written onto cases whose file was found at `path`.
pub fn location_description(path: &str) -> String {
    format!("Automated test: {path}")
}

/// Creates, updates and deletes cases for a [`Reconciliation`].
pub struct Synchronizer<'a> {
    client: &'a dyn ServiceClient,
    sections: &'a dyn SectionResolver,
}

impl<'a> Synchronizer<'a> {
    pub fn new(client: &'a dyn ServiceClient, sections: &'a dyn SectionResolver) -> Self {
        Self { client, sections }
    }

    /// Apply `reconciliation`: create missing cases, update matched ones,
    /// delete orphans.
    ///
    /// In dry-run mode nothing is sent to the service; the report lists what
    /// would have been done.
    ///
    /// # Errors
    ///
    /// The first failing service call aborts the remaining work. Updating or
    /// deleting a case without an id fails with [`Error::MissingId`].
    pub fn synchronize(&self, reconciliation: &Reconciliation) -> Result<SyncReport> {
        let dry_run = reconciliation.dry_run;
        let mut report = SyncReport::success();

        for case in &reconciliation.missing {
            let title = new_case_title(case);
            if dry_run {
                report = report.with_action(format!("[dry-run] Would create case {title:?}"));
                continue;
            }

            let section_id = self.sections.resolve_section(case)?;
            let mut fields = CaseFields::new();
            fields.insert("title".to_string(), json!(title));
            let created = self.client.add_case(section_id, &fields)?;

            info!(case = ?created.id, section = section_id, title = %title, "created case");
            report = report.with_action(format!(
                "Created case {title:?} in section {section_id}"
            ));
        }

        for case in &reconciliation.update {
            let id = case_id(case)?;
            let location = case
                .full_title
                .clone()
                .or_else(|| case.path.as_ref().map(|p| p.to_string_lossy().into_owned()))
                .unwrap_or_else(|| case.title.clone());
            if dry_run {
                report = report.with_action(format!(
                    "[dry-run] Would update case C{id} {:?} with location {location}",
                    case.title
                ));
                continue;
            }

            let mut fields = CaseFields::new();
            fields.insert(
                "custom_description".to_string(),
                json!(location_description(&location)),
            );
            self.client.update_case(id, &fields)?;

            info!(case = id, location = %location, "updated case");
            report = report.with_action(format!("Updated case C{id} {:?}", case.title));
        }

        for case in &reconciliation.orphans {
            let id = case_id(case)?;
            if dry_run {
                report = report.with_action(format!(
                    "[dry-run] Would delete case C{id} {:?}",
                    case.title
                ));
                continue;
            }

            self.client.delete_case(id)?;

            info!(case = id, title = %case.title, "deleted case");
            report = report.with_action(format!("Deleted case C{id} {:?}", case.title));
        }

        Ok(report)
    }
}

fn case_id(case: &Case) -> Result<u64> {
    case.id.ok_or_else(|| Error::MissingId {
        title: case.title.clone(),
    })
}

/// Missing entries are titled by file path; the new case takes the file name
/// so it matches the file on the next reconciliation.
fn new_case_title(case: &Case) -> String {
    let name = base_name(Path::new(&case.title));
    if name.is_empty() { case.title.clone() } else { name }
}
