#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the user-registry-server binary.

use std::process::{Command, Stdio};

use tempfile::TempDir;

fn run_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_user-registry-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute user-registry-server")
}

#[test]
fn help_lists_subcommands_and_options() {
    let output = run_server(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--dsn"));
}

#[test]
fn print_config_applies_cli_overrides() {
    let output = run_server(&[
        "--print-config",
        "--port",
        "9191",
        "--dsn",
        "postgres://app:hunter2@db/users",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("127.0.0.1:9191"));
    assert!(stdout.contains("app:***@db/users"));
    assert!(!stdout.contains("hunter2"));
}

#[test]
fn check_validates_config_file() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.yaml");
    std::fs::write(&good, "user_registry:\n  max_name_length: 20\n").unwrap();
    let output = run_server(&["--config", good.to_str().unwrap(), "check"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Configuration is valid"));

    let bad = dir.path().join("bad.yaml");
    std::fs::write(&bad, "user_registry:\n  max_name_length: 0\n").unwrap();
    let output = run_server(&["--config", bad.to_str().unwrap(), "check"]);
    assert!(!output.status.success());
}

#[test]
fn missing_config_file_is_an_error() {
    let output = run_server(&["--config", "/definitely/not/here.yaml", "check"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config file does not exist"));
}
