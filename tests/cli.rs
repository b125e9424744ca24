use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary config directory
fn temp_config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".ctwatch").join("config.json")
}

const BINARY_NAME: &str = "ctwatch";

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"));
}

#[test]
/// Configure command should persist the API URL to the config file.
fn configure_command_creates_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);

    // Ensure the file does not exist initially
    assert!(!config_path.exists());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("configure")
        .arg("--url")
        .arg("http://monitor.example.com/api/")
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stdout(contains("Configuration saved"));

    // Confirm the file was created with the normalized URL
    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("http://monitor.example.com/api"));
    assert!(!contents.contains("api/\""));
}

#[test]
/// Reset command should delete an existing config file.
fn reset_deletes_config_file() {
    let tmp = temp_config_dir();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, "{}").unwrap();

    assert!(config_path.exists());

    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("reset")
        .env("HOME", tmp.path()) // simulate different $HOME
        .assert()
        .success()
        .stdout(contains("Clearing saved configuration"));

    assert!(!config_path.exists());
}

#[test]
/// Keyword validation fails before any request is sent, so an empty
/// value errors without a backend.
fn keywords_add_rejects_empty_value_offline() {
    let tmp = temp_config_dir();
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("keywords")
        .arg("add")
        .arg("--value")
        .arg("   ")
        .env("HOME", tmp.path())
        .assert()
        .failure()
        .stdout(contains("Validation error"));
}
