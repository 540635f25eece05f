//! Smoke tests for the storecheck CLI
//!
//! None of these reach the network: they cover argument handling, catalog
//! listing and failures while loading inputs.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn storecheck() -> Command {
    Command::cargo_bin("storecheck").expect("storecheck binary should exist")
}

const CONFIG: &str = "\
[ui]
base_url = https://shop.test
cart = /cart
wait_driver = 1

[api]
base_url = http://127.0.0.1:9
track = /track
cart = /cart
cart_short = /cart/short
search = /search
for_data = /products
request_timeout = 1
";

const DATA: &str = r#"{
    "token": "Bearer t",
    "user_agent": "smoke",
    "content_type": "application/json",
    "search_phrase_positive": ["Дюна"],
    "search_phrase_negative": ["qwzx"],
    "number_phone_invalid": ["123"]
}"#;

/// Write config and data files into a fresh directory
fn inputs() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("test_config.ini");
    let data = dir.path().join("test_data.json");
    fs::write(&config, CONFIG).unwrap();
    fs::write(&data, DATA).unwrap();
    (dir, config, data)
}

fn with_inputs<'a>(cmd: &'a mut Command, config: &Path, data: &Path) -> &'a mut Command {
    cmd.arg("--config").arg(config).arg("--data").arg(data)
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    storecheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    storecheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_no_args_fails() {
    storecheck().assert().failure();
}

#[test]
fn test_run_subcommand_help() {
    storecheck()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--suite"))
        .stdout(predicate::str::contains("--fail-fast"))
        .stdout(predicate::str::contains("--report"));
}

// ============================================================================
// List Tests
// ============================================================================

#[test]
fn test_list_prints_expanded_catalog() {
    let (_dir, config, data) = inputs();
    let mut cmd = storecheck();
    with_inputs(cmd.arg("list"), &config, &data)
        .assert()
        .success()
        .stdout(predicate::str::contains("api::cart_clear"))
        .stdout(predicate::str::contains("api::search_positive[Дюна]"))
        .stdout(predicate::str::contains("ui::navigation[/sales]"))
        .stdout(predicate::str::contains("ui::number_phone_invalid[123]"));
}

#[test]
fn test_list_suite_filter() {
    let (_dir, config, data) = inputs();
    let mut cmd = storecheck();
    with_inputs(cmd.args(["list", "--suite", "api"]), &config, &data)
        .assert()
        .success()
        .stdout(predicate::str::contains("api::"))
        .stdout(predicate::str::contains("ui::").not());
}

#[test]
fn test_list_json() {
    let (_dir, config, data) = inputs();
    let mut cmd = storecheck();
    let output = with_inputs(cmd.args(["list", "--json", "--filter", "cart"]), &config, &data)
        .output()
        .unwrap();
    assert!(output.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|case| case["name"].as_str().unwrap().to_string())
        .collect();
    assert!(names.contains(&"api::cart_clear".to_string()));
    assert!(names.contains(&"ui::add_to_cart_from_product_page".to_string()));
    assert!(names.iter().all(|name| name.contains("cart")));
}

// ============================================================================
// Run Tests
// ============================================================================

#[test]
fn test_run_with_no_matching_cases_succeeds() {
    let (_dir, config, data) = inputs();
    let mut cmd = storecheck();
    with_inputs(cmd.args(["run", "--filter", "no-such-case"]), &config, &data)
        .assert()
        .success()
        .stderr(predicate::str::contains("No cases selected"));
}

#[test]
fn test_run_missing_config_fails() {
    let (dir, _config, data) = inputs();
    let mut cmd = storecheck();
    with_inputs(cmd.arg("run"), &dir.path().join("absent.ini"), &data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_run_missing_list_key_fails() {
    let (dir, config, _data) = inputs();
    let data = dir.path().join("partial.json");
    fs::write(&data, r#"{"search_phrase_positive": ["Дюна"]}"#).unwrap();
    let mut cmd = storecheck();
    with_inputs(cmd.arg("run"), &config, &data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("search_phrase_negative"));
}

#[test]
fn test_failed_cases_set_exit_code_and_report() {
    let (dir, config, _data) = inputs();
    let data = dir.path().join("no_auth.json");
    fs::write(
        &data,
        r#"{"search_phrase_positive": [], "search_phrase_negative": [], "number_phone_invalid": []}"#,
    )
    .unwrap();
    let report = dir.path().join("report.json");

    let mut cmd = storecheck();
    with_inputs(
        cmd.args(["run", "--suite", "api", "--filter", "cart_clear", "--report"])
            .arg(&report),
        &config,
        &data,
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("1 of 1 cases failed"));

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
    assert_eq!(written["results"][0]["status"], "failed");
    assert!(written["results"][0]["error"]
        .as_str()
        .unwrap()
        .contains("token"));
}
