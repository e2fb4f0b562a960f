#![cfg(feature = "cli")]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn recwire() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_recwire"));
    command.env_remove("RECWIRE_FORMAT");
    command
}

fn run_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = recwire()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("recwire should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin)
        .expect("stdin should be writable");
    child.wait_with_output().expect("recwire should finish")
}

fn stdout_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .trim_end()
        .to_string()
}

#[test]
fn serialize_inline_object_as_json_record() {
    let payload = r#"{"prop":"value"}"#;
    let output = recwire()
        .args(["--format", "json", "serialize", "--json", payload])
        .output()
        .expect("serialize should run");

    assert!(output.status.success());
    assert_eq!(
        stdout_line(&output),
        r#"{"headers":{},"value":"{\"prop\":\"value\"}"}"#
    );
}

#[test]
fn serialize_response_from_stdin() {
    let output = run_with_stdin(
        &["--format", "json", "serialize", "--response"],
        br#"{"foo":"bar"}"#,
    );

    assert!(output.status.success());
    assert_eq!(
        stdout_line(&output),
        r#"{"headers":{},"value":"{\"foo\":\"bar\"}"}"#
    );
}

#[test]
fn serialize_packet_envelope_with_headers() {
    let output = run_with_stdin(
        &["--format", "json", "serialize", "--packet"],
        br#"{"data":{"key":"1","value":"string","headers":{"kafka_correlationId":"1234"}}}"#,
    );

    assert!(output.status.success());
    assert_eq!(
        stdout_line(&output),
        r#"{"headers":{"kafka_correlationId":"1234"},"key":"1","value":"string"}"#
    );
}

#[test]
fn serialize_raw_writes_value_bytes_only() {
    let output = recwire()
        .args(["--format", "raw", "serialize", "--json", "12345"])
        .output()
        .expect("serialize should run");

    assert!(output.status.success());
    assert_eq!(output.stdout, b"12345");
}

#[test]
fn serialize_reads_payload_file() {
    let path = PathBuf::from(format!(
        "/tmp/recwire-payload-{}-{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::write(&path, "[1,2,3,4,5]").unwrap();

    let output = recwire()
        .args(["--format", "json", "serialize", "--file"])
        .arg(&path)
        .output()
        .expect("serialize should run");

    assert!(output.status.success());
    assert_eq!(
        stdout_line(&output),
        r#"{"headers":{},"value":"[1,2,3,4,5]"}"#
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn serialize_invalid_json_returns_60() {
    let output = recwire()
        .args(["serialize", "--json", "{not json"])
        .output()
        .expect("serialize should run");

    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not valid JSON"));
}

#[test]
fn headers_lists_correlation_id() {
    let output = recwire()
        .args(["--format", "json", "headers"])
        .output()
        .expect("headers should run");

    assert!(output.status.success());
    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = listed
        .as_array()
        .expect("headers should emit an array")
        .iter()
        .filter_map(|entry| entry.get("name").and_then(|n| n.as_str()))
        .collect();
    assert!(names.contains(&"kafka_correlationId"));
}

#[test]
fn version_reports_package_version() {
    let output = recwire()
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    assert_eq!(
        stdout_line(&output),
        format!("recwire {}", env!("CARGO_PKG_VERSION"))
    );
}
