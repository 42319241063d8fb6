//! Settings tests for `aura-cli config get|set|list`.

use crate::common::{aura_cmd, prefs_dir, read_config, write_config};
use predicates::prelude::*;
use serde_json::json;

/// First run creates the config file with defaults.
#[test]
fn test_first_run_creates_config_with_defaults() {
    let prefs = prefs_dir();

    aura_cmd(prefs.path())
        .args(["config", "get", "output"])
        .assert()
        .success()
        .stdout("default\n");

    let doc = read_config(prefs.path());
    assert_eq!(doc["aura"]["base-url"], json!("https://api.neo4j.io/v1"));
    assert_eq!(doc["aura"]["auth-url"], json!("https://api.neo4j.io/oauth/token"));
    assert_eq!(doc["aura"]["beta-enabled"], json!(false));
}

#[test]
fn test_set_then_get_output() {
    let prefs = prefs_dir();

    aura_cmd(prefs.path())
        .args(["config", "set", "output", "json"])
        .assert()
        .success();

    aura_cmd(prefs.path())
        .args(["config", "get", "output"])
        .assert()
        .success()
        .stdout("json\n");
}

#[test]
fn test_beta_toggle_switches_base_url() {
    let prefs = prefs_dir();

    aura_cmd(prefs.path())
        .args(["config", "set", "beta-enabled", "true"])
        .assert()
        .success();
    let doc = read_config(prefs.path());
    assert_eq!(doc["aura"]["beta-enabled"], json!(true));
    assert_eq!(doc["aura"]["base-url"], json!("https://api.neo4j.io/v1beta5"));

    aura_cmd(prefs.path())
        .args(["config", "set", "beta-enabled", "false"])
        .assert()
        .success();
    assert_eq!(
        read_config(prefs.path())["aura"]["base-url"],
        json!("https://api.neo4j.io/v1")
    );
}

#[test]
fn test_invalid_key_is_a_usage_error() {
    let prefs = prefs_dir();

    aura_cmd(prefs.path())
        .args(["config", "set", "colour", "blue"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("invalid config key 'colour'"))
        .stderr(predicate::str::contains("auth-url, base-url, default-tenant, output, beta-enabled"));
}

#[test]
fn test_invalid_output_value_is_rejected() {
    let prefs = prefs_dir();

    aura_cmd(prefs.path())
        .args(["config", "set", "output", "yaml"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("default, json, table"));

    assert_eq!(read_config(prefs.path())["aura"]["output"], json!("default"));
}

#[test]
fn test_list_shows_aura_section_with_masked_secrets() {
    let prefs = prefs_dir();
    write_config(
        prefs.path(),
        r#"{"aura": {"output": "table", "credentials": [
            {"name": "c", "client-id": "id", "client-secret": "top-secret", "access-token": "", "token-expiry": 0}
        ]}}"#,
    );

    let output = aura_cmd(prefs.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("top-secret").not())
        .get_output()
        .stdout
        .clone();

    let listed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(listed["output"], json!("table"));
    assert_eq!(listed["base-url"], json!("https://api.neo4j.io/v1"));
    assert_eq!(listed["credentials"][0]["client-id"], json!("id"));
}

#[test]
fn test_env_override_is_reported_and_seeds_first_run() {
    let prefs = prefs_dir();

    aura_cmd(prefs.path())
        .env("AURA_BASE_URL", "http://localhost:9999/v1")
        .args(["config", "get", "base-url"])
        .assert()
        .success()
        .stdout("http://localhost:9999/v1\n");

    assert_eq!(
        read_config(prefs.path())["aura"]["base-url"],
        json!("http://localhost:9999/v1")
    );
}

#[test]
fn test_foreign_keys_are_preserved() {
    let prefs = prefs_dir();
    write_config(
        prefs.path(),
        r#"{"other-tool": {"keep": [1, 2, 3]}, "aura": {"output": "json"}}"#,
    );

    aura_cmd(prefs.path())
        .args(["config", "set", "default-tenant", "tenant-1"])
        .assert()
        .success();

    let doc = read_config(prefs.path());
    assert_eq!(doc["other-tool"], json!({"keep": [1, 2, 3]}));
    assert_eq!(doc["aura"]["default-tenant"], json!("tenant-1"));
    assert_eq!(doc["aura"]["output"], json!("json"));
}
