//! CLI integration tests
//!
//! Run the built binary against a temporary store directory.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(dir: &TempDir, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_superstore");
    Command::new(cli_bin)
        .current_dir(dir.path())
        .args(["--dir", dir.path().to_str().unwrap(), "--name", "prefs"])
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_get_with_default_persists() {
    let dir = TempDir::new().unwrap();

    let output = run(&dir, &["get", "theme", "--default", "dark"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "dark");

    let output = run(&dir, &["get", "theme", "--default", "light"]);
    assert_eq!(stdout(&output), "dark");

    let on_disk = fs::read_to_string(dir.path().join("prefs.json")).unwrap();
    assert!(on_disk.contains("\"theme\": \"dark\""));
}

#[test]
fn test_get_missing_without_default_fails() {
    let dir = TempDir::new().unwrap();

    let output = run(&dir, &["get", "theme"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_NOT_FOUND"), "stderr: {}", stderr);
}

#[test]
fn test_set_delete_has() {
    let dir = TempDir::new().unwrap();

    assert!(run(&dir, &["set", "window.width", "800"]).status.success());
    assert!(run(&dir, &["has", "window.width"]).status.success());
    assert_eq!(stdout(&run(&dir, &["get", "window.width"])), "800");

    assert!(run(&dir, &["delete", "window.width"]).status.success());
    assert!(!run(&dir, &["has", "window.width"]).status.success());
}

#[test]
fn test_has_missing_key_exits_1_without_error() {
    let dir = TempDir::new().unwrap();

    let output = run(&dir, &["has", "theme"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn test_path_command() {
    let dir = TempDir::new().unwrap();

    let output = run(&dir, &["path"]);

    assert!(output.status.success());
    assert!(stdout(&output).ends_with("prefs.json"));
}

#[test]
fn test_config_file_defaults_and_clear() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("store.toml");
    fs::write(&config, "[defaults]\ntheme = \"dark\"\n").unwrap();
    let config = config.to_str().unwrap();

    assert!(run(&dir, &["--config", config, "set", "theme", "light"])
        .status
        .success());
    assert_eq!(stdout(&run(&dir, &["--config", config, "get", "theme"])), "light");

    assert!(run(&dir, &["--config", config, "clear"]).status.success());
    assert_eq!(stdout(&run(&dir, &["--config", config, "get", "theme"])), "dark");
}
