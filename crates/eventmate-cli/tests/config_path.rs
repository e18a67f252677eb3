use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("api_url"));
    assert!(contents.contains("[logging]"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_invalid_api_url_flag_is_rejected() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", dir.path())
        .args(["--api-url", "not a url", "events", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --api-url"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "request_timeout_secs = \"soon\"").unwrap();

    cargo_bin_cmd!("eventmate")
        .env("EVENTMATE_HOME", dir.path())
        .args(["events", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("load config"));
}
