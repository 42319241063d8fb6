//! Project tests for `aura-cli config project`.

use crate::common::{aura_cmd, prefs_dir, read_config, write_config};
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;

fn add_project(prefix: &Path, name: &str, org: &str, project: &str) {
    aura_cmd(prefix)
        .args([
            "config",
            "project",
            "add",
            "--name",
            name,
            "--organization-id",
            org,
            "--project-id",
            project,
        ])
        .assert()
        .success();
}

fn list_projects(prefix: &Path) -> serde_json::Value {
    let output = aura_cmd(prefix)
        .args(["config", "project", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_list_with_no_projects() {
    let prefs = prefs_dir();
    assert_eq!(
        list_projects(prefs.path()),
        json!({"default-project": "", "projects": {}})
    );
}

#[test]
fn test_add_list_and_use() {
    let prefs = prefs_dir();
    add_project(prefs.path(), "p1", "org1", "proj1");
    add_project(prefs.path(), "p2", "org2", "proj2");

    assert_eq!(
        list_projects(prefs.path()),
        json!({
            "default-project": "p1",
            "projects": {
                "p1": {"organization-id": "org1", "project-id": "proj1"},
                "p2": {"organization-id": "org2", "project-id": "proj2"}
            }
        })
    );

    aura_cmd(prefs.path())
        .args(["config", "project", "use", "p2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Set p2 as default project with organization ID org2 and project ID proj2",
        ));
    assert_eq!(list_projects(prefs.path())["default-project"], json!("p2"));
}

#[test]
fn test_removing_default_prints_reassignment_notice() {
    let prefs = prefs_dir();
    add_project(prefs.path(), "p1", "org1", "proj1");
    add_project(prefs.path(), "p2", "org2", "proj2");

    aura_cmd(prefs.path())
        .args(["config", "project", "remove", "p1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Removed the current default project p1, setting p2 as the new default project",
        ));

    assert_eq!(
        read_config(prefs.path())["aura-projects"]["default-project"],
        json!("p2")
    );
}

#[test]
fn test_removing_last_project_clears_default() {
    let prefs = prefs_dir();
    add_project(prefs.path(), "only", "o", "p");

    aura_cmd(prefs.path())
        .args(["config", "project", "remove", "only"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        list_projects(prefs.path()),
        json!({"default-project": "", "projects": {}})
    );
}

#[test]
fn test_duplicate_and_missing_projects_are_usage_errors() {
    let prefs = prefs_dir();
    add_project(prefs.path(), "p", "o", "i");

    aura_cmd(prefs.path())
        .args([
            "config", "project", "add", "--name", "p", "--organization-id", "x",
            "--project-id", "y",
        ])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("already have a project with the name p"));

    aura_cmd(prefs.path())
        .args(["config", "project", "remove", "q"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains(
            "could not find a project with the name q to remove",
        ));
}

#[test]
fn test_legacy_default_field_is_upgraded() {
    let prefs = prefs_dir();
    write_config(
        prefs.path(),
        r#"{"aura-projects": {"default": "old", "projects": {"old": {"organization-id": "o", "project-id": "p"}}}}"#,
    );

    assert_eq!(list_projects(prefs.path())["default-project"], json!("old"));

    let doc = read_config(prefs.path());
    assert!(doc["aura-projects"].get("default").is_none());
}
