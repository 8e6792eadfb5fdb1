// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI integration tests.
//!
//! These tests run the actual chatwire binary and verify its behavior.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Get the path to the built chatwire binary
fn chatwire_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_chatwire"))
}

/// Run chatwire with arguments
fn run(args: &[&str]) -> Output {
    let bin = chatwire_bin();
    Command::new(&bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|_| panic!("Failed to run {:?}", bin))
}

/// Run chatwire and assert success
fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "Command failed: {:?}\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run chatwire and assert failure
fn run_err(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        !output.status.success(),
        "Command should have failed but succeeded: {:?}",
        args
    );
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    let output = run_ok(&["--help"]);
    assert!(output.contains("decode"));
    assert!(output.contains("encode"));
    assert!(output.contains("inspect"));
    assert!(output.contains("schema"));
}

#[test]
fn test_cli_version() {
    let output = run_ok(&["--version"]);
    assert!(output.contains("chatwire"));
}

#[test]
fn test_cli_no_args() {
    let output = run(&[]);
    assert!(!output.status.success());
}

// ============================================================================
// Schema Commands
// ============================================================================

#[test]
fn test_schema_list() {
    let output = run_ok(&["schema", "list"]);
    assert!(output.contains("ConversationList"));
    assert!(output.contains("UserInfo"));
    assert!(output.contains("Status (3 fields)"));
}

#[test]
fn test_schema_list_json() {
    let output = run_ok(&["schema", "list", "--json"]);
    let names: Vec<String> = serde_json::from_str(&output).unwrap();
    assert_eq!(names.len(), 15);
    assert!(names.contains(&"SendMessage".to_string()));
}

#[test]
fn test_schema_show() {
    let output = run_ok(&["schema", "show", "Status"]);
    assert!(output.contains("message Status {"));
    assert!(output.contains("required int32 code = 2;"));
    assert!(output.contains("required string msg = 3;"));
}

#[test]
fn test_schema_show_unknown() {
    let stderr = run_err(&["schema", "show", "Nope"]);
    assert!(stderr.contains("Unknown type"));
}

// ============================================================================
// Encode / Decode / Inspect
// ============================================================================

#[test]
fn test_encode_decode_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("user.json");
    let bin_path = dir.path().join("user.bin");
    std::fs::write(
        &json_path,
        r#"{"status": {"code": 1, "msg": "success"}, "data": {"id": "100001", "name": "Alice"}}"#,
    )
    .unwrap();

    run_ok(&[
        "encode",
        "UserInfo",
        path_str(&json_path),
        "-o",
        path_str(&bin_path),
    ]);
    let output = run_ok(&["decode", "UserInfo", path_str(&bin_path)]);

    let decoded: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        decoded,
        serde_json::json!({
            "status": {"code": 1, "msg": "success"},
            "data": {"id": "100001", "name": "Alice"}
        })
    );
}

#[test]
fn test_encode_hex() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("status.json");
    std::fs::write(&json_path, r#"{"code": 1, "msg": "ok"}"#).unwrap();

    let output = run_ok(&["encode", "Status", path_str(&json_path), "--hex"]);
    assert_eq!(output.trim(), "10011a026f6b");
}

#[test]
fn test_encode_missing_required_fails() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("status.json");
    std::fs::write(&json_path, r#"{"code": 1}"#).unwrap();

    let stderr = run_err(&["encode", "Status", path_str(&json_path)]);
    assert!(stderr.contains("Missing required field 'msg'"));
}

#[test]
fn test_encode_rejects_non_object() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("list.json");
    std::fs::write(&json_path, "[1, 2]").unwrap();

    let stderr = run_err(&["encode", "Status", path_str(&json_path)]);
    assert!(stderr.contains("must be a JSON object"));
}

#[test]
fn test_decode_hex_input() {
    let dir = tempfile::tempdir().unwrap();
    let hex_path = dir.path().join("status.hex");
    std::fs::write(&hex_path, "10 01 1a 02 6f 6b\n").unwrap();

    let output = run_ok(&["decode", "Status", path_str(&hex_path), "--hex"]);
    let decoded: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(decoded, serde_json::json!({"code": 1, "msg": "ok"}));
}

#[test]
fn test_decode_truncated_fails_without_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let hex_path = dir.path().join("bad.hex");
    std::fs::write(&hex_path, "0a7f").unwrap();

    let stderr = run_err(&["decode", "UserInfo", path_str(&hex_path), "--hex"]);
    assert!(stderr.contains("Truncated message"));
}

#[test]
fn test_decode_truncated_recovers_with_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let hex_path = dir.path().join("bad.hex");
    std::fs::write(&hex_path, "0a7f").unwrap();

    let output = run(&[
        "decode",
        "UserInfo",
        path_str(&hex_path),
        "--hex",
        "--fallback",
    ]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("recovered (default confidence)"));

    let decoded: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(decoded["status"]["code"], 1);
    assert_eq!(decoded["status"]["msg"], "success");
}

#[test]
fn test_decode_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("codec.toml");
    let hex_path = dir.path().join("bad.hex");
    std::fs::write(&config_path, "[fallback]\ndefault_msg = \"offline\"\n").unwrap();
    std::fs::write(&hex_path, "0a7f").unwrap();

    let output = run_ok(&[
        "--config",
        path_str(&config_path),
        "decode",
        "UserInfo",
        path_str(&hex_path),
        "--hex",
        "--fallback",
    ]);
    let decoded: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(decoded["status"]["msg"], "offline");
}

#[test]
fn test_bad_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("codec.toml");
    std::fs::write(&config_path, "[decoder]\nmax_depth = 0\n").unwrap();

    let stderr = run_err(&["--config", path_str(&config_path), "schema", "list"]);
    assert!(stderr.contains("max_depth"));
}

#[test]
fn test_inspect_nested() {
    let dir = tempfile::tempdir().unwrap();
    let hex_path = dir.path().join("wrapper.hex");
    // Wrapper{status: Status{code: 1, msg: "success"}}
    std::fs::write(&hex_path, "0a0b1001 1a0773756363657373").unwrap();

    let output = run_ok(&["inspect", path_str(&hex_path), "--hex"]);
    assert!(output.contains("13 bytes"));
    assert!(output.contains("#1 length-delimited [11] {"));
    assert!(output.contains("#2 varint = 1"));
    assert!(output.contains("#3 length-delimited [7] = \"success\""));
}

#[test]
fn test_inspect_reports_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let hex_path = dir.path().join("bad.hex");
    std::fs::write(&hex_path, "0d").unwrap();

    let stderr = run_err(&["inspect", path_str(&hex_path), "--hex"]);
    assert!(stderr.contains("Unsupported wire type 5"));
}

#[test]
fn test_inspect_expands_message_with_printable_framing() {
    let dir = tempfile::tempdir().unwrap();
    let hex_path = dir.path().join("framed.hex");
    // #1 { #1 = "1234567890" }; keys and lengths are all printable bytes
    std::fs::write(&hex_path, "0a0c 0a0a 31323334353637383930").unwrap();

    let output = run_ok(&["inspect", path_str(&hex_path), "--hex"]);
    assert!(output.contains("#1 length-delimited [12] = \"\\n\\n1234567890\" {"));
    assert!(output.contains("  @0 #1 length-delimited [10] = \"1234567890\""));
}
