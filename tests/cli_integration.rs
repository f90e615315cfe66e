//! CLI integration tests
//!
//! These run the compiled binary and check output, files and exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn infradiag_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_infradiag"))
}

fn run(args: &[&str]) -> Output {
    Command::new(infradiag_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("INFRADIAG_LOG_LEVEL")
        .env_remove("INFRADIAG_MAX_DEPTH")
        .output()
        .expect("Failed to execute infradiag")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

fn create_npm_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Dockerfile"), "CMD [\"npm\",\"start\"]\n").unwrap();
    dir
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("scan"));
    assert!(stdout.contains("discover"));
    assert!(stdout.contains("clone"));
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_scan_two_customers_yaml() {
    let a = create_npm_repo();
    let b = create_npm_repo();
    let output = run(&["-q", "scan", path_arg(a.path()), path_arg(b.path())]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Diagram:"));
    assert!(stdout.contains("EC2_CustomerA:"));
    assert!(stdout.contains("EC2_CustomerB:"));
    assert_eq!(stdout.matches("Type: AWS::CloudFront").count(), 1);
}

#[test]
fn test_scan_named_customers_json() {
    let a = create_npm_repo();
    let output = run(&[
        "-q",
        "scan",
        path_arg(a.path()),
        "--customer",
        "Acme",
        "--format",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["Diagram"]["Resources"]["Acme"]["Type"], "AWS::VPC");
    assert_eq!(value["Diagram"]["Resources"]["Acme"]["Children"][0], "EC2_Acme");
}

#[test]
fn test_scan_writes_output_file() {
    let a = create_npm_repo();
    let out = TempDir::new().unwrap();
    let out_file = out.path().join("architecture.yaml");

    let output = run(&["-q", "scan", path_arg(a.path()), "-o", path_arg(&out_file)]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(fs::read_to_string(out_file).unwrap().contains("Canvas:"));
}

#[test]
fn test_scan_customer_count_mismatch() {
    let a = create_npm_repo();
    let output = run(&["scan", path_arg(a.path()), "-c", "Acme", "-c", "Globex"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("customer name"));
}

#[test]
fn test_scan_invalid_customer_name() {
    let a = create_npm_repo();
    let output = run(&["scan", path_arg(a.path()), "-c", "not valid"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_scan_missing_directory() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");
    let output = run(&["scan", path_arg(&missing)]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn test_scan_partial_failure_still_emits() {
    let a = create_npm_repo();
    fs::write(a.path().join("package.json"), "{ not json").unwrap();

    let output = run(&["-q", "scan", path_arg(a.path())]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains("EC2_CustomerA:"));
}

#[test]
fn test_discover_fixture_json() {
    let output = run(&["-q", "discover", &fixture("customer-python"), "-f", "json"]);

    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["discovery"]["docker"]["app_server"], "Flask");
    assert_eq!(value["discovery"]["aws_sqs"], "enabled");
    assert_eq!(value["errors"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_invalid_environment_is_fatal() {
    let a = create_npm_repo();
    let output = Command::new(infradiag_bin())
        .args(["scan", path_arg(a.path())])
        .env("INFRADIAG_MAX_DEPTH", "deep")
        .output()
        .expect("Failed to execute infradiag");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("INFRADIAG_MAX_DEPTH"));
}

#[test]
fn test_logs_go_to_stderr() {
    let a = create_npm_repo();
    let output = run(&["-v", "scan", path_arg(a.path()), "-f", "json"]);

    assert_eq!(output.status.code(), Some(0));
    serde_json::from_slice::<serde_json::Value>(&output.stdout).expect("stdout is pure JSON");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Repository scan completed"));
}

fn run_with_rust_log(rust_log: &str, args: &[&str]) -> Output {
    Command::new(infradiag_bin())
        .args(args)
        .env("RUST_LOG", rust_log)
        .env_remove("INFRADIAG_LOG_LEVEL")
        .env_remove("INFRADIAG_MAX_DEPTH")
        .output()
        .expect("Failed to execute infradiag")
}

#[test]
fn test_rust_log_enables_crate_debug() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("requirements.txt"), "redis==4.0\n").unwrap();

    let output = run_with_rust_log("infradiag=debug", &["discover", path_arg(dir.path())]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Parsing file"));
}

#[test]
fn test_rust_log_wins_over_verbose_flag() {
    let a = create_npm_repo();
    let output = run_with_rust_log("infradiag=error", &["-v", "scan", path_arg(a.path())]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Repository scan completed"));
    assert!(!stderr.contains("Parsing file"));
}

#[test]
fn test_clone_existing_directory_is_skipped() {
    let dir = TempDir::new().unwrap();
    let output = run(&["clone", "https://invalid.example/repo.git", path_arg(dir.path())]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("already exists"));
}
