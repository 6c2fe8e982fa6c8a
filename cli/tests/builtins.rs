//! # Kook Built-in Command Integration Tests
//!
//! File: cli/tests/builtins.rs
//!
//! ## Overview
//!
//! Tests for `kook version`, `kook completion <shell>` and the hidden
//! `kook __complete`, with and without a Kookfile.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_version_command() {
    let project = empty_project();
    kook_in(&project)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::eq(format!(
            "kook version {}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_completion_without_kookfile() {
    let project = empty_project();
    kook_in(&project)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kook"));
}

#[test]
fn test_completion_script_for_each_shell() {
    let project = empty_project();
    for shell in ["bash", "zsh", "fish", "powershell"] {
        kook_in(&project)
            .args(["completion", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("kook __complete --"));
    }
}

#[test]
fn test_completion_rejects_unknown_shell() {
    let project = empty_project();
    kook_in(&project)
        .args(["completion", "tcsh"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_complete_lists_names_and_aliases() {
    let project = sample_project();
    kook_in(&project)
        .args(["__complete", "--"])
        .assert()
        .success()
        .stdout(predicate::str::contains("completion\t"))
        .stdout(predicate::str::contains("deploy\tDeploy the app\n"))
        .stdout(predicate::str::contains("d\tDeploy the app\n"))
        .stdout(predicate::str::contains("fail\n"))
        .stdout(predicate::str::contains("__complete").not());
}

#[test]
fn test_complete_lists_flags_of_command() {
    let project = sample_project();
    kook_in(&project)
        .args(["__complete", "--", "d"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "--interactive\tUse interactive mode to select options\n--env\tTarget environment\n",
        ));
}

#[test]
fn test_complete_without_kookfile_lists_builtins() {
    let project = empty_project();
    kook_in(&project)
        .args(["__complete", "--"])
        .assert()
        .success()
        .stdout(predicate::str::contains("version\t"))
        .stdout(predicate::str::contains("deploy").not());
}

#[test]
fn test_completion_follows_kookfile_changes() {
    let project = project_with(
        "version: 1\ncommands:\n  - name: deploy\n    script: echo deploy\n",
    );
    let script = kook_in(&project)
        .args(["completion", "bash"])
        .output()
        .expect("Failed to run kook completion");
    assert!(script.status.success());
    let script = String::from_utf8(script.stdout).unwrap();
    assert!(!script.contains("deploy"), "declared names must not be baked in");

    fs::write(
        project.path().join("Kookfile"),
        "version: 1\ncommands:\n  - name: build\n    script: echo build\n",
    )
    .unwrap();

    kook_in(&project)
        .args(["__complete", "--"])
        .assert()
        .success()
        .stdout(predicate::str::contains("build\n"))
        .stdout(predicate::str::contains("deploy").not());
}

#[cfg(unix)]
#[test]
fn test_bash_completion_asks_kook_at_completion_time() {
    let project = project_with(
        "version: 1\ncommands:\n  - name: deploy\n    script: echo deploy\n",
    );
    let script_path = project.path().join("kook.bash");
    let script = kook_in(&project)
        .args(["completion", "bash"])
        .output()
        .expect("Failed to run kook completion");
    fs::write(&script_path, script.stdout).unwrap();

    fs::write(
        project.path().join("Kookfile"),
        "version: 1\ncommands:\n  - name: build\n    script: echo build\n    options:\n      - name: target\n        type: str\n",
    )
    .unwrap();

    let bin_dir = kook_binary()
        .parent()
        .expect("binary has a parent directory")
        .to_path_buf();
    let mut paths = vec![bin_dir];
    if let Some(path) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&path));
    }
    let path = std::env::join_paths(paths).unwrap();

    let complete = |words: &str, cword: usize| {
        Command::new("bash")
            .current_dir(project.path())
            .env("PATH", &path)
            .env_remove("KOOK_FILE")
            .arg("-c")
            .arg(format!(
                "source ./kook.bash; COMP_WORDS=({}); COMP_CWORD={}; _kook; printf '%s\\n' \"${{COMPREPLY[@]}}\"",
                words, cword
            ))
            .output()
            .expect("Failed to run bash")
    };

    let top = complete("kook ''", 1);
    let top = String::from_utf8(top.stdout).unwrap();
    assert!(top.lines().any(|l| l == "build"), "{}", top);
    assert!(!top.contains("deploy"), "{}", top);

    let flags = complete("kook build --t", 2);
    assert_eq!(String::from_utf8(flags.stdout).unwrap(), "--target\n");
}
