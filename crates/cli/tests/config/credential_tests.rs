//! Credential tests for `aura-cli config credential`.

use crate::common::{aura_cmd, prefs_dir, read_config};
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;

fn add_credential(prefix: &Path, name: &str) {
    let client_id = format!("{name}-id");
    let client_secret = format!("{name}-secret");
    aura_cmd(prefix)
        .args([
            "config",
            "credential",
            "add",
            "--name",
            name,
            "--client-id",
            client_id.as_str(),
            "--client-secret",
            client_secret.as_str(),
        ])
        .assert()
        .success();
}

#[test]
fn test_first_credential_becomes_default() {
    let prefs = prefs_dir();
    add_credential(prefs.path(), "prod");
    add_credential(prefs.path(), "dev");

    let doc = read_config(prefs.path());
    assert_eq!(doc["aura"]["default-credential"], json!("prod"));
    assert_eq!(
        doc["aura"]["credentials"][1],
        json!({
            "name": "dev",
            "client-id": "dev-id",
            "client-secret": "dev-secret",
            "access-token": "",
            "token-expiry": 0
        })
    );
}

#[test]
fn test_duplicate_credential_is_rejected_without_change() {
    let prefs = prefs_dir();
    add_credential(prefs.path(), "prod");
    let before = std::fs::read(crate::common::config_path(prefs.path())).unwrap();

    aura_cmd(prefs.path())
        .args([
            "config", "credential", "add", "--name", "prod", "--client-id", "x",
            "--client-secret", "y",
        ])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("already have credential with name prod"));

    assert_eq!(std::fs::read(crate::common::config_path(prefs.path())).unwrap(), before);
}

#[test]
fn test_use_and_list_credentials() {
    let prefs = prefs_dir();
    add_credential(prefs.path(), "prod");
    add_credential(prefs.path(), "dev");

    aura_cmd(prefs.path())
        .args(["config", "credential", "use", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Set dev as default credential with client ID dev-id",
        ));

    let output = aura_cmd(prefs.path())
        .args(["config", "credential", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("secret").not())
        .get_output()
        .stdout
        .clone();

    let listed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        listed,
        json!([
            {"name": "prod", "client-id": "prod-id", "default": false},
            {"name": "dev", "client-id": "dev-id", "default": true}
        ])
    );
}

#[test]
fn test_removing_default_credential_clears_default() {
    let prefs = prefs_dir();
    add_credential(prefs.path(), "prod");
    add_credential(prefs.path(), "dev");

    aura_cmd(prefs.path())
        .args(["config", "credential", "remove", "prod"])
        .assert()
        .success();

    let doc = read_config(prefs.path());
    assert_eq!(doc["aura"]["default-credential"], json!(""));
    assert_eq!(doc["aura"]["credentials"].as_array().unwrap().len(), 1);
}

#[test]
fn test_missing_credential_errors() {
    let prefs = prefs_dir();

    aura_cmd(prefs.path())
        .args(["config", "credential", "remove", "ghost"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains(
            "could not find credential with name ghost to remove",
        ));

    aura_cmd(prefs.path())
        .args(["config", "credential", "use", "ghost"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("could not find credential with name ghost"));
}
