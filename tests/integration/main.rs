//! Integration tests for the husk CLI
//!
//! Each test runs the real binary with `$HOME` pointed at a temporary
//! directory, so nothing touches the user's configuration.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper function to create a husk command with an isolated home
fn husk(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("husk"));
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

/// Install a template tree and configuration under `home`
fn install_templates(home: &TempDir) {
    let root = home.path().join(".config/husk");
    fs::create_dir_all(root.join("templates/licenses/MIT")).unwrap();
    fs::create_dir_all(root.join("templates/licenses/Apache-2.0")).unwrap();
    fs::write(root.join("templates/licenses/MIT/LICENSE"), "MIT License").unwrap();
    fs::write(root.join("templates/licenses/Apache-2.0/LICENSE"), "Apache").unwrap();
    fs::write(root.join("templates/.gitignore"), "*.pyc\n").unwrap();
    fs::write(root.join("config.json"), r#"{"username": "octo"}"#).unwrap();
}

// =============================================================================
// Basic commands
// =============================================================================

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    husk(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_json() {
    let home = TempDir::new().unwrap();
    husk(&home)
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    husk(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("token"))
        .stdout(predicate::str::contains("licenses"));
}

#[test]
fn test_no_command_prints_hint() {
    let home = TempDir::new().unwrap();
    husk(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("husk setup"));
}

// =============================================================================
// Licenses
// =============================================================================

#[test]
fn test_licenses_without_setup() {
    let home = TempDir::new().unwrap();
    husk(&home)
        .arg("licenses")
        .assert()
        .success()
        .stdout(predicate::str::contains("husk setup"));
}

#[test]
fn test_licenses_lists_catalog() {
    let home = TempDir::new().unwrap();
    install_templates(&home);
    husk(&home)
        .args(["--json", "licenses"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Apache-2.0\""))
        .stdout(predicate::str::contains("\"MIT\""));
}

// =============================================================================
// New project
// =============================================================================

#[test]
fn test_new_without_config_is_config_error() {
    let home = TempDir::new().unwrap();
    let project = TempDir::new().unwrap();
    husk(&home)
        .args(["new", "-n", "demo", "-l", "MIT", "-d", "x", "-y", "-f"])
        .arg(project.path())
        .assert()
        .code(6)
        .stderr(predicate::str::contains("husk setup"));

    // nothing was scaffolded
    assert_eq!(fs::read_dir(project.path()).unwrap().count(), 0);
    // the run still got its own log file
    let logs = home.path().join(".config/husk/logs");
    assert_eq!(fs::read_dir(logs).unwrap().count(), 1);
}

#[test]
fn test_new_with_unknown_license_is_input_error() {
    let home = TempDir::new().unwrap();
    install_templates(&home);
    let project = TempDir::new().unwrap();
    husk(&home)
        .args(["new", "-n", "demo", "-l", "WTFPL", "-d", "x", "-y", "-f"])
        .arg(project.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("WTFPL"));
}

#[test]
fn test_new_with_missing_folder_is_input_error() {
    let home = TempDir::new().unwrap();
    install_templates(&home);
    husk(&home)
        .args(["--json", "new", "-n", "demo", "-l", "MIT", "-d", "x", "-y", "-f"])
        .arg(home.path().join("missing"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"exit_code\": 2"));
}

#[test]
fn test_new_declined_confirmation_is_cancelled() {
    let home = TempDir::new().unwrap();
    install_templates(&home);
    let project = TempDir::new().unwrap();
    husk(&home)
        .args(["new", "-n", "demo", "-l", "MIT", "-d", "x", "-f"])
        .arg(project.path())
        .write_stdin("n\n")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Is this info correct?"))
        .stderr(predicate::str::contains("Cancelling..."));

    assert_eq!(fs::read_dir(project.path()).unwrap().count(), 0);
}

#[test]
fn test_new_prompts_for_missing_values() {
    let home = TempDir::new().unwrap();
    install_templates(&home);
    let project = TempDir::new().unwrap();
    husk(&home)
        .args(["new", "-f"])
        .arg(project.path())
        .write_stdin("\nMy Demo\nsome words\nGPL\nMIT\nno\n")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("repository name can't be empty"))
        .stderr(predicate::str::contains("`GPL` license is not available."))
        .stderr(predicate::str::contains("Repository name: my-demo"));
}

// =============================================================================
// Token
// =============================================================================

#[test]
fn test_token_requires_username() {
    let home = TempDir::new().unwrap();
    husk(&home).args(["token", "store"]).assert().failure();
}
