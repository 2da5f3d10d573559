//! CLI surface checks that run without any configured backend.
//!
//! Every command needs the CITYSYNC_* variables before it talks to a vendor,
//! so a scrubbed environment exercises argument parsing and the configuration
//! error path without touching the network.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const CONFIG_VARS: [&str; 4] = [
    "CITYSYNC_ROSTER_ID",
    "CITYSYNC_GOOGLE_TOKEN",
    "CITYSYNC_COPY_SCRIPT_ID",
    "CITYSYNC_SLACK_TOKEN",
];

/// Command with no citysync configuration and a bare working directory, so
/// neither the test environment nor a stray `.env` can leak credentials in.
fn citysync_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("citysync"));
    cmd.current_dir(dir);
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_lists_every_subcommand() {
    let dir = TempDir::new().expect("tempdir");
    citysync_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("sync"))
        .stdout(contains("roster"))
        .stdout(contains("groups"));
}

#[test]
fn version_flag_reports_the_binary_name() {
    let dir = TempDir::new().expect("tempdir");
    citysync_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("citysync"));
}

#[test]
fn sync_without_configuration_names_the_missing_variable() {
    let dir = TempDir::new().expect("tempdir");
    citysync_cmd(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(contains("CITYSYNC_ROSTER_ID"));
}

#[test]
fn groups_create_requires_cities_or_the_roster_flag() {
    let dir = TempDir::new().expect("tempdir");
    citysync_cmd(dir.path())
        .args(["groups", "create"])
        .assert()
        .failure()
        .stderr(contains("provide city names or use --from-roster"));
}

#[test]
fn groups_create_rejects_cities_combined_with_from_roster() {
    let dir = TempDir::new().expect("tempdir");
    citysync_cmd(dir.path())
        .args(["groups", "create", "Austin", "--from-roster"])
        .assert()
        .failure();
}

#[test]
fn set_topics_reports_an_unreadable_file_before_configuration() {
    let dir = TempDir::new().expect("tempdir");
    citysync_cmd(dir.path())
        .args(["groups", "set-topics", "definitely-missing.json"])
        .assert()
        .failure()
        .stderr(contains("cannot read topics file"));
}

#[test]
fn set_topics_rejects_a_non_object_file() {
    let dir = TempDir::new().expect("tempdir");
    let file = dir.path().join("topics.json");
    fs::write(&file, "[1, 2, 3]").expect("write fixture");
    citysync_cmd(dir.path())
        .args(["groups", "set-topics", "topics.json"])
        .assert()
        .failure()
        .stderr(contains("JSON object"));
}

#[test]
fn unknown_subcommand_fails_with_usage() {
    let dir = TempDir::new().expect("tempdir");
    citysync_cmd(dir.path())
        .arg("annex")
        .assert()
        .failure()
        .stderr(contains("Usage"));
}
