//! Integration tests for CLI commands.

use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_ldkernel"))
        .args(args)
        .output()
        .expect("Failed to execute CLI");
    split(output)
}

fn run_cli_stdin(args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ldkernel"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    // The CLI may stop reading early (size limit), so a broken pipe is fine.
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    split(child.wait_with_output().unwrap())
}

fn split(output: Output) -> (String, String, i32) {
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn thing() -> Value {
    json!({"name": "x", "@type": "Thing", "@context": "https://schema.org"})
}

const IDENTITY_COMPACT: &str = r#"{"@context":"https://schema.org","@type":"Thing","name":"x","provenance":{"@type":"Provenance","kernelVersion":"0.1.0","rulesApplied":["identity"]}}"#;

#[test]
fn test_transform_identity_compact() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "thing.jsonld", &thing().to_string());

    let (stdout, _, code) = run_cli(&["transform", path.to_str().unwrap(), "--compact"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), IDENTITY_COMPACT);
}

#[test]
fn test_transform_pretty_by_default() {
    let (stdout, _, code) = run_cli_stdin(&["transform"], &thing().to_string());
    assert_eq!(code, 0);
    assert!(stdout.starts_with("{\n  \"@context\": \"https://schema.org\",\n"));
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["provenance"]["rulesApplied"], json!(["identity"]));
}

#[test]
fn test_transform_output_is_repeatable() {
    let input = thing().to_string();
    let (first, _, _) = run_cli_stdin(&["transform", "--compact"], &input);
    let (second, _, _) = run_cli_stdin(&["transform", "--compact"], &input);
    assert_eq!(first, second);
}

#[test]
fn test_transform_invalid_context_prints_error_document() {
    let (stdout, _, code) = run_cli_stdin(&["transform", "--compact"], r#"{"@type":"Thing"}"#);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim_end(),
        r#"{"@context":"https://schema.org","@type":"Error","error":"Input must include an @context property","errorCode":"INVALID_CONTEXT","provenance":{"@type":"Provenance","kernelVersion":"0.1.0","rulesApplied":[]}}"#
    );
}

#[test]
fn test_transform_strict_fails_on_error_document() {
    let (stdout, stderr, code) = run_cli_stdin(&["transform", "--strict"], "[1, 2, 3]");
    assert_eq!(code, 1);
    assert!(stdout.contains("INVALID_INPUT"));
    assert!(stderr.contains("Error: Transform rejected input: INVALID_INPUT"));
}

#[test]
fn test_transform_event_rules() {
    let input = json!({
        "@context": "https://schema.org",
        "@type": "Event",
        "name": "  launch   PARTY ",
        "eventStatus": "cancelled",
        "startDate": "2025-03-01",
        "endDate": "2025-03-01",
        "duration": "PT2H"
    });
    let (stdout, _, code) =
        run_cli_stdin(&["transform", "--rules", "event-normalization"], &input.to_string());
    assert_eq!(code, 0);

    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["name"], "Launch Party");
    assert_eq!(output["eventStatus"], "https://schema.org/EventCancelled");
    assert_eq!(
        output["provenance"]["rulesApplied"],
        json!(["normalize-event-name", "normalize-event-status"])
    );
}

#[test]
fn test_transform_kernel_version_override() {
    let (stdout, _, code) = run_cli_stdin(
        &["transform", "--compact", "--kernel-version", "2.1.0"],
        &thing().to_string(),
    );
    assert_eq!(code, 0);
    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["provenance"]["kernelVersion"], "2.1.0");
}

#[test]
fn test_transform_rejects_malformed_kernel_version() {
    let (_, stderr, code) = run_cli_stdin(
        &["transform", "--kernel-version", "latest"],
        &thing().to_string(),
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid kernel version"));
}

#[test]
fn test_transform_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_file(
        &dir,
        "config.json",
        r#"{"kernelVersion":"1.0.0","errorContext":"https://example.org/errors"}"#,
    );

    let (stdout, _, code) = run_cli_stdin(
        &["transform", "--compact", "--config", config.to_str().unwrap()],
        "{}",
    );
    assert_eq!(code, 0);
    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["@context"], "https://example.org/errors");
    assert_eq!(output["provenance"]["kernelVersion"], "1.0.0");
}

#[test]
fn test_transform_config_rejects_unknown_fields() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "config.json", r#"{"clock":"now"}"#);

    let (_, stderr, code) = run_cli_stdin(
        &["transform", "--config", config.to_str().unwrap()],
        &thing().to_string(),
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid pipeline configuration"));
}

#[test]
fn test_transform_missing_file() {
    let (_, stderr, code) = run_cli(&["transform", "/nonexistent/input.jsonld"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("File not found: /nonexistent/input.jsonld"));
}

#[test]
fn test_transform_invalid_json() {
    let (_, stderr, code) = run_cli_stdin(&["transform"], "{not json");
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid JSON in input"));
}

#[test]
fn test_transform_max_size() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "thing.jsonld", &thing().to_string());

    let (_, stderr, code) = run_cli(&["transform", path.to_str().unwrap(), "--max-size", "8"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("exceeds maximum 8 bytes"));
}

#[test]
fn test_max_size_applies_to_stdin() {
    let big = format!("{{\"@context\":\"x\",\"pad\":\"{}\"}}", "a".repeat(4096));
    for command in ["transform", "canonicalize", "digest"] {
        let (stdout, stderr, code) = run_cli_stdin(&[command, "--max-size", "64"], &big);
        assert_eq!(code, 1, "{command} accepted oversized input");
        assert!(stdout.is_empty());
        assert!(stderr.contains("exceeds maximum 64 bytes"), "{command}: {stderr}");
    }
}

#[test]
fn test_digest_max_size_allows_small_input() {
    let (stdout, _, code) = run_cli_stdin(&["digest", "--max-size", "2"], "{}");
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim_end(),
        "sha-256:RBNvo1WzZ4oRRq0W9-hknpT7T8If536DEMBg9hyq_4o"
    );
}

#[test]
fn test_canonicalize_sorts_keys() {
    let (stdout, _, code) = run_cli_stdin(&["canonicalize"], r#"{"b":1,"a":{"d":[3,1],"c":null}}"#);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim_end(), r#"{"a":{"c":null,"d":[3,1]},"b":1}"#);
}

#[test]
fn test_canonicalize_pretty() {
    let (stdout, _, code) = run_cli_stdin(&["canonicalize", "--pretty"], r#"{"b":1,"a":2}"#);
    assert_eq!(code, 0);
    assert_eq!(stdout, "{\n  \"a\": 2,\n  \"b\": 1\n}\n");
}

#[test]
fn test_digest() {
    let (stdout, _, code) = run_cli_stdin(&["digest"], r#"{"b":1,"a":2}"#);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.trim_end(),
        "sha-256:02JqwwqH5vemQoIzs8aCmZdoZfpVCOQmfFQVx2r3p3I"
    );
}

#[test]
fn test_digest_json() {
    let (stdout, _, code) = run_cli_stdin(&["digest", "--json"], "{}");
    assert_eq!(code, 0);
    let output: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["alg"], "sha-256");
    assert_eq!(output["b64"], "RBNvo1WzZ4oRRq0W9-hknpT7T8If536DEMBg9hyq_4o");
}
