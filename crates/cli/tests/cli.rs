//! End-to-end checks through the real `gantry` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gantry() -> Command {
    Command::cargo_bin("gantry").expect("gantry binary")
}

#[test]
fn config_set_then_get_round_trips_with_types() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("gantry_config.toml");

    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "exporterconfig", "passes", "3"])
        .assert()
        .success();

    // The value was stored as an integer, not the string "3".
    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "exporterconfig", "passes", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"value\": 3"));
}

#[test]
fn config_set_falls_back_to_plain_strings() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("gantry_config.toml");

    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "exporterconfig", "format", "dwg"])
        .assert()
        .success();

    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "exporterconfig", "format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dwg"));
}

#[test]
fn config_list_shows_section_names() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("gantry_config.toml");

    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "wallcheckconfig", "passes", "1"])
        .assert()
        .success();

    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wallcheckconfig"));
}

#[test]
fn config_get_missing_option_fails_with_context() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("gantry_config.toml");

    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "exporterconfig", "format", "dwg"])
        .assert()
        .success();

    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "exporterconfig", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("option not found: exporterconfig.missing"));
}

#[test]
fn config_remove_deletes_a_whole_section() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("gantry_config.toml");

    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "doomedconfig", "k", "v"])
        .assert()
        .success();

    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "remove", "doomedconfig"])
        .assert()
        .success();

    gantry()
        .arg("--config")
        .arg(&config)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("doomedconfig").not());
}

#[test]
fn env_json_reports_the_framework_version() {
    // --json is global: it works in front of the subcommand too.
    gantry()
        .args(["--json", "env"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn appdata_list_only_reports_managed_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("gantry_2026_names.json"), b"{}").unwrap();
    std::fs::write(dir.path().join("unrelated.txt"), b"x").unwrap();

    gantry()
        .args(["appdata", "list", "--data-root"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("gantry_2026_names.json"))
        .stdout(predicate::str::contains("unrelated.txt").not());
}

#[test]
fn appdata_cleanup_removes_foreign_session_instance_files() {
    let dir = TempDir::new().unwrap();
    let stale = dir.path().join("gantry_2026_12_cache.tmp");
    let live = dir.path().join("gantry_2026_77_cache.tmp");
    let data = dir.path().join("gantry_2026_names.json");
    for path in [&stale, &live, &data] {
        std::fs::write(path, b"x").unwrap();
    }

    gantry()
        .args([
            "appdata",
            "cleanup",
            "--host-version",
            "2026",
            "--session-id",
            "77",
            "--data-root",
        ])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("removed 1 instance file(s), kept 1"));

    assert!(!stale.exists());
    assert!(live.exists());
    assert!(data.exists());
}
