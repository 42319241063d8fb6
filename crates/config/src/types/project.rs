//! Project records, the project list view and scope resolution results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named organization/project pair that commands target by default.
///
/// The name is the key of the record in the `projects` map and is not
/// repeated inside the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing)]
    pub name: String,

    #[serde(rename = "organization-id", default)]
    pub organization_id: String,

    #[serde(rename = "project-id", default)]
    pub project_id: String,

    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        organization_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            organization_id: organization_id.into(),
            project_id: project_id.into(),
            extra: Map::new(),
        }
    }
}

/// Snapshot of the project section, shaped like the file for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectList {
    #[serde(rename = "default-project")]
    pub default_project: String,
    pub projects: BTreeMap<String, Project>,
}

/// Organization and project ids for a command, after falling back to the default project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectScope {
    pub organization_id: Option<String>,
    pub project_id: Option<String>,
}

impl ProjectScope {
    /// Names of the ids still missing, using their flag names.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.organization_id.is_none() {
            missing.push("organization-id");
        }
        if self.project_id.is_none() {
            missing.push("project-id");
        }
        missing
    }
}

/// On-disk shapes of the `projects` collection.
///
/// Older files stored an ordered list of records carrying their own `name`.
/// Current files store a map keyed by name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredProjects {
    Keyed(BTreeMap<String, Project>),
    Listed(Vec<Project>),
}

impl StoredProjects {
    /// Normalizes either shape into a name-keyed map with `name` filled in.
    ///
    /// In the list shape a later record with a repeated name replaces the earlier one.
    pub(crate) fn into_map(self) -> BTreeMap<String, Project> {
        match self {
            Self::Keyed(map) => map
                .into_iter()
                .map(|(name, mut project)| {
                    project.name.clone_from(&name);
                    (name, project)
                })
                .collect(),
            Self::Listed(list) => list
                .into_iter()
                .map(|project| (project.name.clone(), project))
                .collect(),
        }
    }
}
