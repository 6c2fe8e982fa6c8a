//! # Kook CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behavior of the `kook` binary: `--help`, `--version`, Kookfile
//! discovery, `--file`/`KOOK_FILE`, and how loading failures are reported.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_help_lists_declared_commands() {
    let project = sample_project();
    kook_in(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("Deploy the app"))
        .stdout(predicate::str::contains("completion"))
        .stdout(predicate::str::contains("__complete").not());
}

#[test]
fn test_help_without_kookfile() {
    let project = empty_project();
    kook_in(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_version_flag() {
    let project = empty_project();
    kook_in(&project)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_kookfile_found_in_parent_directory() {
    let project = sample_project();
    let nested = project.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();
    kook_cmd()
        .current_dir(&nested)
        .args(["deploy", "--env", "qa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy testapp --to qa"));
}

#[test]
fn test_declared_command_without_kookfile_fails() {
    let project = empty_project();
    kook_in(&project)
        .args(["deploy", "--env", "qa"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no Kookfile found"));
}

#[test]
fn test_explicit_file_flag() {
    let project = empty_project();
    let elsewhere = sample_project();
    kook_in(&project)
        .arg("--file")
        .arg(elsewhere.path().join("Kookfile"))
        .args(["deploy", "-e", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy testapp --to prod"));
}

#[test]
fn test_explicit_file_from_environment() {
    let project = empty_project();
    let elsewhere = sample_project();
    kook_in(&project)
        .env("KOOK_FILE", elsewhere.path().join("Kookfile"))
        .args(["deploy", "-e", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy testapp --to prod"));
}

#[test]
fn test_invalid_definition_reported() {
    let project = project_with("version: 2\ncommands:\n  - name: a\n    script: echo\n");
    kook_in(&project)
        .args(["a"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unsupported config version: 2"));
}

#[test]
fn test_unknown_key_reported() {
    let project = project_with("version: 1\ncommands:\n  - name: a\n    script: echo\n    colour: red\n");
    kook_in(&project)
        .args(["a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"))
        .stderr(predicate::str::contains("colour"));
}

#[test]
fn test_empty_kookfile_reported() {
    let project = project_with("   \n");
    kook_in(&project)
        .args(["a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file is empty"));
}

#[test]
fn test_builtins_survive_invalid_definition() {
    let project = project_with("version: 1\ncommands: []\n");
    kook_in(&project)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kook version"));
}

#[test]
fn test_unknown_command_rejected_by_parser() {
    let project = sample_project();
    kook_in(&project)
        .arg("launch")
        .assert()
        .failure()
        .code(2);
}
