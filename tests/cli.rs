//! End-to-end CLI tests
//!
//! Only offline paths are exercised: usage errors, cross-target validation
//! and the bump engine against a local git remote.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;

fn cb() -> Command {
    Command::cargo_bin("cb").unwrap()
}

#[test]
fn no_arguments_is_a_usage_error() {
    cb().assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("no action given"));
}

#[test]
fn unknown_action_is_a_usage_error() {
    cb().arg("frobnicate")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown action 'frobnicate'"));
}

#[test]
fn unknown_action_fails_even_after_valid_ones() {
    cb().args(["build", "frobnicate"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unknown action 'frobnicate'"));
}

#[test]
fn help_lists_the_action_surface() {
    cb().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deps"))
        .stdout(predicate::str::contains("bump"));
}

#[test]
fn unknown_cross_target_is_rejected_before_building() {
    cb().arg("build")
        .env("CB_CROSS_TARGET", "mips")
        .env_remove("CROSS_TARGET")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown cross-compile target 'mips'"));
}

#[test]
fn unknown_cross_target_is_rejected_on_the_deps_path_too() {
    // The target name is checked at configuration time, so an install-only
    // invocation must fail before reaching any package manager.
    cb().arg("deps")
        .env("CB_CROSS_TARGET", "mips")
        .env_remove("CROSS_TARGET")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown cross-compile target 'mips'"))
        .stderr(predicate::str::contains("installing dependencies").not());
}

#[test]
fn cb_cross_target_wins_over_cross_target() {
    // The fallback variable alone would be a valid target; the primary one
    // must take precedence and fail.
    cb().arg("build")
        .env("CB_CROSS_TARGET", "mips")
        .env("CROSS_TARGET", "armv7")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'mips'"));
}

fn git(dir: &Path, args: &[&str]) {
    let status = StdCommand::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .status()
        .expect("git not available");
    assert!(status.success(), "git {:?} failed", args);
}

/// Create a git checkout whose `origin` remote (itself) carries version tags
fn repo_with_tags(dir: &Path, tags: &[&str]) {
    git(dir, &["init", "-q"]);
    git(
        dir,
        &[
            "-c",
            "user.name=test",
            "-c",
            "user.email=test@test",
            "commit",
            "--allow-empty",
            "-q",
            "-m",
            "init",
        ],
    );
    for tag in tags {
        git(dir, &["tag", tag]);
    }
    git(dir, &["remote", "add", "origin", "."]);
}

fn write_version_header(root: &Path, version: &str) {
    std::fs::create_dir_all(root.join("include")).unwrap();
    std::fs::write(
        root.join("include/project_version.h"),
        format!(
            "#pragma once\n#define PROJECT_VERSION \"{}\"\n",
            version
        ),
    )
    .unwrap();
}

#[test]
fn bump_on_the_shared_release_line_starts_a_new_minor() {
    let dir = tempfile::tempdir().unwrap();
    repo_with_tags(dir.path(), &["v5.1.3", "v5.0.0"]);
    write_version_header(dir.path(), "5.1.1");

    cb().arg("bump")
        .current_dir(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("5.1.1 -> 5.2.1"));

    let header = std::fs::read_to_string(dir.path().join("include/project_version.h")).unwrap();
    assert!(header.contains("#define PROJECT_VERSION \"5.2.1\""));
}

#[test]
fn bump_ahead_of_upstream_accumulates_patch() {
    let dir = tempfile::tempdir().unwrap();
    repo_with_tags(dir.path(), &["v5.1.3"]);
    write_version_header(dir.path(), "5.2.1");

    cb().arg("bump")
        .current_dir(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("5.2.1 -> 5.2.2"));

    let header = std::fs::read_to_string(dir.path().join("include/project_version.h")).unwrap();
    assert!(header.contains("#define PROJECT_VERSION \"5.2.2\""));
}

#[test]
fn bump_without_usable_tags_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    repo_with_tags(dir.path(), &["nightly"]);
    write_version_header(dir.path(), "1.0.0");

    cb().arg("bump")
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Remote version lookup failed"));

    // The header is left untouched on failure
    let header = std::fs::read_to_string(dir.path().join("include/project_version.h")).unwrap();
    assert!(header.contains("\"1.0.0\""));
}

#[test]
fn bump_without_a_remote_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);
    write_version_header(dir.path(), "1.0.0");

    cb().arg("bump")
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Remote version lookup failed"));
}
