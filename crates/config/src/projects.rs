//! Named organization/project bindings and the default project.
//!
//! Responsibilities:
//! - Add, remove and list projects stored under `aura-projects.projects`.
//! - Track the default project in `aura-projects.default-project`.
//! - Fill organization and project ids a command was not given from the default project.
//!
//! Does NOT handle:
//! - Validating ids against the API.
//!
//! Invariants:
//! - Project names are unique and non-empty.
//! - The first project added becomes the default.
//! - After a removal the default is either empty (no projects left) or names an existing project.
//!   A replacement default is the first remaining project in name order.
//!   This holds for list-shaped files too: their records are keyed by name on read, so list order is not kept.
//! - Writes always use the name-keyed map shape, whatever shape was read.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::constants::{DEFAULT_PROJECT_PATH, PROJECTS_PATH};
use crate::document;
use crate::error::ConfigError;
use crate::persistence::{ConfigFile, Patch, decode_section};
use crate::types::{Project, ProjectList, ProjectScope, StoredProjects};

/// Project registry bound to a config file.
///
/// Obtained from [`crate::ConfigStore::projects`].
#[derive(Debug)]
pub struct Projects<'a> {
    file: &'a ConfigFile,
}

/// What [`Projects::remove`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub removed: Project,
    /// True if the removed project was the default.
    pub was_default: bool,
    /// Set when another project was promoted to default.
    pub new_default: Option<String>,
}

impl RemoveOutcome {
    /// User-facing message describing a default reassignment, if one happened.
    pub fn notice(&self) -> Option<String> {
        let new_default = self.new_default.as_deref()?;
        Some(if self.was_default {
            format!(
                "Removed the current default project {}, setting {} as the new default project",
                self.removed.name, new_default
            )
        } else {
            format!("Default project did not exist, setting {new_default} as the new default project")
        })
    }
}

fn decode(document: &Value) -> Result<BTreeMap<String, Project>, ConfigError> {
    Ok(decode_section::<StoredProjects>(document, PROJECTS_PATH)?
        .map(StoredProjects::into_map)
        .unwrap_or_default())
}

fn encode(projects: &BTreeMap<String, Project>) -> Result<Value, ConfigError> {
    serde_json::to_value(projects).map_err(ConfigError::Encode)
}

fn default_name(document: &Value) -> &str {
    document::get_str(document, DEFAULT_PROJECT_PATH).unwrap_or_default()
}

impl<'a> Projects<'a> {
    pub(crate) fn new(file: &'a ConfigFile) -> Self {
        Self { file }
    }

    /// Adds a project. The first project becomes the default.
    pub fn add(
        &self,
        name: &str,
        organization_id: &str,
        project_id: &str,
    ) -> Result<Project, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::EmptyName { kind: "project" });
        }

        let document = self.file.read()?;
        let mut projects = decode(&document)?;
        if projects.contains_key(name) {
            return Err(ConfigError::DuplicateProject(name.to_string()));
        }

        let project = Project::new(name, organization_id, project_id);
        projects.insert(name.to_string(), project.clone());

        let mut patch = Patch::new().set(PROJECTS_PATH, encode(&projects)?);
        if projects.len() == 1 {
            patch = patch.set(DEFAULT_PROJECT_PATH, name);
        }
        self.file.commit(document, patch)?;

        tracing::debug!(project = %name, "Added project");
        Ok(project)
    }

    /// Removes a project.
    ///
    /// When the default no longer resolves afterwards, the first remaining
    /// project becomes the default; with none left the default is cleared.
    pub fn remove(&self, name: &str) -> Result<RemoveOutcome, ConfigError> {
        let document = self.file.read()?;
        let mut projects = decode(&document)?;

        let removed = projects
            .remove(name)
            .ok_or_else(|| ConfigError::ProjectNotFoundForRemoval(name.to_string()))?;

        let current_default = default_name(&document).to_string();
        let was_default = current_default == name;

        let mut patch = Patch::new().set(PROJECTS_PATH, encode(&projects)?);
        let mut new_default = None;
        match projects.keys().next() {
            None => patch = patch.set(DEFAULT_PROJECT_PATH, ""),
            Some(first) if !projects.contains_key(&current_default) => {
                patch = patch.set(DEFAULT_PROJECT_PATH, first.as_str());
                new_default = Some(first.clone());
            }
            Some(_) => {}
        }
        self.file.commit(document, patch)?;

        let outcome = RemoveOutcome {
            removed,
            was_default,
            new_default,
        };
        if let Some(notice) = outcome.notice() {
            tracing::info!(project = %name, new_default = ?outcome.new_default, "{notice}");
        } else {
            tracing::debug!(project = %name, "Removed project");
        }
        Ok(outcome)
    }

    /// Makes the named project the default and returns it.
    pub fn set_default(&self, name: &str) -> Result<Project, ConfigError> {
        let document = self.file.read()?;
        let project = decode(&document)?
            .remove(name)
            .ok_or_else(|| ConfigError::ProjectNotFound(name.to_string()))?;

        self.file
            .commit(document, Patch::new().set(DEFAULT_PROJECT_PATH, name))?;
        Ok(project)
    }

    /// Returns the default project, or `None` when unset or when it names a missing project.
    pub fn default(&self) -> Result<Option<Project>, ConfigError> {
        let document = self.file.read()?;
        let name = default_name(&document);
        if name.is_empty() {
            return Ok(None);
        }
        Ok(decode(&document)?.remove(name))
    }

    /// Like [`Projects::default`], but an absent default is an empty record.
    pub fn default_or_empty(&self) -> Result<Project, ConfigError> {
        Ok(self.default()?.unwrap_or_default())
    }

    /// Snapshot of the default name and every project.
    pub fn list(&self) -> Result<ProjectList, ConfigError> {
        let document = self.file.read()?;
        Ok(ProjectList {
            default_project: default_name(&document).to_string(),
            projects: decode(&document)?,
        })
    }

    /// Fills ids not given on the command line from the default project.
    ///
    /// Empty strings count as not given. Ids still missing afterwards are `None`.
    pub fn resolve_scope(
        &self,
        organization_id: Option<&str>,
        project_id: Option<&str>,
    ) -> Result<ProjectScope, ConfigError> {
        let given = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);
        let fallback = |value: String| Some(value).filter(|v| !v.is_empty());

        let mut scope = ProjectScope {
            organization_id: given(organization_id),
            project_id: given(project_id),
        };
        if scope.organization_id.is_some() && scope.project_id.is_some() {
            return Ok(scope);
        }

        let default = self.default_or_empty()?;
        if scope.organization_id.is_none() {
            scope.organization_id = fallback(default.organization_id);
        }
        if scope.project_id.is_none() {
            scope.project_id = fallback(default.project_id);
        }
        Ok(scope)
    }
}
