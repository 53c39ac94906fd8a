//! CLI integration tests for mssql-catalog.
//!
//! These tests verify command-line argument parsing, help output,
//! command output and exit codes for various error conditions.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a command for the mssql-catalog binary.
fn cmd() -> Command {
    Command::cargo_bin("mssql-catalog").unwrap()
}

/// Write `content` to a temporary file with the given suffix.
fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("map"));
}

#[test]
fn test_map_subcommand_help() {
    cmd()
        .args(["map", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--checked"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mssql-catalog"));
}

#[test]
fn test_global_flags_in_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--output-json"))
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("--verbosity"));
}

#[test]
fn test_missing_subcommand_fails() {
    cmd().assert().failure();
}

// =============================================================================
// List and Show Tests
// =============================================================================

#[test]
fn test_list_all_views() {
    cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("sys.objects"))
        .stdout(predicate::str::contains("sys.query_store_runtime_stats"))
        .stdout(predicate::str::contains("24 views"));
}

#[test]
fn test_list_with_filter() {
    cmd()
        .args(["list", "--filter", "sys.dm_os_*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sys.dm_os_memory_brokers"))
        .stdout(predicate::str::contains("sys.objects").not())
        .stdout(predicate::str::contains("1 views"));
}

#[test]
fn test_list_json() {
    let output = cmd().args(["--output-json", "list"]).output().unwrap();
    assert!(output.status.success());

    let views: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let views = views.as_array().unwrap();
    assert_eq!(views.len(), 24);
    assert_eq!(views[0]["name"], "sys.objects");
    assert_eq!(views[0]["alias"], "o");
    assert_eq!(views[0]["family"], "objects");
}

#[test]
fn test_show_view() {
    cmd()
        .args(["show", "[sys].[partitions]"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SELECT p.[partition_id]"))
        .stdout(predicate::str::contains("FROM [sys].[partitions] p"))
        .stdout(predicate::str::contains("bigint"));
}

#[test]
fn test_show_json() {
    let output = cmd()
        .args(["--output-json", "show", "schemas"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["name"], "schemas");
    assert_eq!(view["columns"][0]["name"], "name");
    assert_eq!(view["columns"][2]["nullable"], true);
}

#[test]
fn test_show_unknown_view_exit_code() {
    cmd()
        .args(["show", "sys.nope"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("sys.nope"));
}

// =============================================================================
// Export Tests
// =============================================================================

#[test]
fn test_export_json() {
    let output = cmd().arg("export").output().unwrap();
    assert!(output.status.success());

    let views: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(views.as_array().unwrap().len(), 24);
    assert!(views[0]["sql"].as_str().unwrap().starts_with("SELECT o.["));
}

#[test]
fn test_export_yaml() {
    cmd()
        .args(["export", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("family: objects"))
        .stdout(predicate::str::contains("sql_type: int"));
}

#[test]
fn test_export_invalid_format() {
    cmd().args(["export", "--format", "xml"]).assert().failure();
}

// =============================================================================
// Map Tests
// =============================================================================

#[test]
fn test_map_snapshot() {
    let snapshot = temp_file(
        ".json",
        r#"{"columns": ["name", "schema_id", "principal_id"],
            "rows": [["dbo", 1, 1], ["guest", 2, null]]}"#,
    );

    let output = cmd()
        .args(["map", "sys.schemas", "--input"])
        .arg(snapshot.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records[0]["name"], "dbo");
    assert_eq!(records[1]["schema_id"], 2);
    assert!(records[1]["principal_id"].is_null());
}

#[test]
fn test_map_unexpected_null_exit_code() {
    let snapshot = temp_file(
        ".json",
        r#"{"columns": ["name", "schema_id", "principal_id"], "rows": [["dbo", null, 1]]}"#,
    );

    cmd()
        .args(["map", "sys.schemas", "--input"])
        .arg(snapshot.path())
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("schema_id"));
}

#[test]
fn test_map_checked_layout_mismatch() {
    let snapshot = temp_file(
        ".json",
        r#"{"columns": ["name", "schema_id"], "rows": [["dbo", 1]]}"#,
    );

    cmd()
        .args(["map", "sys.schemas", "--checked", "--input"])
        .arg(snapshot.path())
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_map_invalid_snapshot_exit_code() {
    let snapshot = temp_file(".json", "{ not json");

    cmd()
        .args(["map", "sys.schemas", "--input"])
        .arg(snapshot.path())
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_map_missing_input_exit_code() {
    cmd()
        .args(["map", "sys.schemas", "--input", "/nonexistent/snapshot.json"])
        .assert()
        .failure()
        .code(7);
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_missing_config_file_exit_code() {
    cmd()
        .args(["--config", "/nonexistent/config.yaml", "list"])
        .assert()
        .failure()
        .code(7);
}

#[test]
fn test_invalid_yaml_config_exit_code() {
    let config = temp_file(".yaml", "catalog: [unclosed");

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("list")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_invalid_pattern_config_exit_code() {
    let config = temp_file(".yaml", "catalog:\n  include_views: [\"sys.[\"]\n");

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("list")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_config_filters_catalog() {
    let config = temp_file(
        ".yaml",
        "catalog:\n  include_views: [\"sys.dm_*\"]\n  exclude_views: [\"dm_exec_*\"]\n",
    );

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("sys.dm_os_memory_brokers"))
        .stdout(predicate::str::contains("sys.dm_exec_requests").not())
        .stdout(predicate::str::contains("3 views"));

    cmd()
        .arg("--config")
        .arg(config.path())
        .args(["show", "sys.objects"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_config_validate_layout_implies_checked() {
    let config = temp_file(".yaml", "reader:\n  validate_layout: true\n");
    let snapshot = temp_file(
        ".json",
        r#"{"columns": ["schema_id", "name", "principal_id"], "rows": []}"#,
    );

    cmd()
        .arg("--config")
        .arg(config.path())
        .args(["map", "sys.schemas", "--input"])
        .arg(snapshot.path())
        .assert()
        .failure()
        .code(3);
}

#[test]
fn test_invalid_log_format_exit_code() {
    cmd()
        .args(["--log-format", "xml", "list"])
        .assert()
        .failure()
        .code(1);
}
