//! # Kook CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test writes
//! its own Kookfile into a temporary directory and runs the compiled `kook`
//! binary from there, so discovery never picks up a file from the checkout.
//!

// Not every test file uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// Kookfile shared by most tests: one variable and a handful of commands that
/// cover each option type, a failing script and a silent script.
pub const SAMPLE_KOOKFILE: &str = r#"
version: 1
variables:
  - name: app_name
    value: testapp
commands:
  - name: deploy
    aliases: [d]
    description: Deploy the app
    script: echo "deploy {{ app_name }} --to {{ env }}"
    options:
      - name: env
        description: Target environment
        type: str
        mandatory: true
        shorthand: e
  - name: scale
    description: Scale the app
    script: echo "replicas={{ count }} ratio={{ ratio }} force={{ force }}"
    options:
      - name: count
        type: int
      - name: ratio
        type: float
      - name: force
        type: bool
  - name: fail
    script: exit 3
  - name: quiet
    silent: true
    script: echo hushed
"#;

/// # Get Kook Command (`kook_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `kook` binary with the
/// kook environment variables cleared.
///
/// ## Panics
/// Panics if the `kook` binary cannot be found via `Command::cargo_bin`.
pub fn kook_cmd() -> Command {
    let mut cmd = Command::cargo_bin("kook").expect("Failed to find kook binary for testing");
    cmd.env_remove("KOOK_FILE")
        .env_remove("KOOK_SHELL")
        .env_remove("RUST_LOG");
    cmd
}

/// Path of the compiled `kook` binary.
pub fn kook_binary() -> std::path::PathBuf {
    assert_cmd::cargo::cargo_bin("kook")
}

/// `kook_cmd` running inside `dir`.
pub fn kook_in(dir: &TempDir) -> Command {
    let mut cmd = kook_cmd();
    cmd.current_dir(dir.path());
    cmd
}

/// Creates a temporary directory holding a Kookfile with `content`.
pub fn project_with(content: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("Kookfile"), content).expect("Failed to write Kookfile");
    dir
}

/// Temporary directory holding `SAMPLE_KOOKFILE`.
pub fn sample_project() -> TempDir {
    project_with(SAMPLE_KOOKFILE)
}

/// Temporary directory without any Kookfile.
pub fn empty_project() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}
