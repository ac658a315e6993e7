//! Case lookup by project, testsuite, section and type

use serde::Deserialize;
use tracing::debug;

use crate::client::ServiceClient;
use crate::error::{EntityKind, Error};
use crate::model::Case;
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CaseQuery {
    pub project: String,
    pub suite: String,
    #[serde(default)]
    pub section: Option<String>,
    /// Case type names. Empty means every type.
    #[serde(default)]
    pub types: Vec<String>,
}

impl CaseQuery {
    pub fn new(project: impl Into<String>, suite: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            suite: suite.into(),
            ..Self::default()
        }
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn types<I: IntoIterator<Item = S>, S: Into<String>>(mut self, types: I) -> Self {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }
}

/// Retrieves the cases used as the comparison set for file matching.
pub struct CaseFinder<'a> {
    client: &'a dyn ServiceClient,
}

impl<'a> CaseFinder<'a> {
    pub fn new(client: &'a dyn ServiceClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Fails with [`Error::NotFound`] if the project, testsuite or section
    /// does not exist, and propagates case type translation failures.
    pub fn get_cases(&self, query: &CaseQuery) -> Result<Vec<Case>> {
        let project = self
            .client
            .project_by_name(&query.project)?
            .ok_or_else(|| Error::not_found(EntityKind::Project, &query.project))?;

        let suite = self
            .client
            .suite_by_name(project.id, &query.suite)?
            .ok_or_else(|| Error::not_found(EntityKind::Suite, &query.suite))?;

        let section_id = match &query.section {
            None => None,
            Some(name) => {
                let section = self
                    .client
                    .section_by_name(project.id, suite.id, name)?
                    .ok_or_else(|| Error::not_found(EntityKind::Section, name))?;
                Some(section.id)
            }
        };

        let type_ids = if query.types.is_empty() {
            Vec::new()
        } else {
            self.client.case_type_ids(&query.types)?
        };

        let cases = self
            .client
            .cases(project.id, suite.id, section_id, &type_ids)?;
        debug!(suite = %suite.name, count = cases.len(), "cases found");
        Ok(cases)
    }
}
