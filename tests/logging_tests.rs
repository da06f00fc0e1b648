use predicates::prelude::*;
use tempfile::tempdir;

use test_helpers::base_jupdate_command;

#[test]
fn test_default_run_keeps_stderr_quiet() {
    let temp_dir = tempdir().unwrap();

    base_jupdate_command(temp_dir.path())
        .arg("moods")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_verbose_text_logs_include_root_span() {
    let temp_dir = tempdir().unwrap();

    base_jupdate_command(temp_dir.path())
        .args(["-v", "moods"])
        .assert()
        .success()
        .stderr(predicate::str::contains("app_invocation"))
        .stderr(predicate::str::contains("correlation_id"));
}

#[test]
fn test_json_logs_are_one_object_per_line() {
    let temp_dir = tempdir().unwrap();

    let output = base_jupdate_command(temp_dir.path())
        .args(["--log-format", "json", "--verbose", "moods"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().filter(|line| !line.is_empty()).collect();
    assert!(!lines.is_empty());

    for line in lines {
        let event: serde_json::Value = serde_json::from_str(line)
            .unwrap_or_else(|e| panic!("not JSON: {} ({})", line, e));
        assert!(event.get("level").is_some());
        assert!(event.get("fields").is_some());
    }
    assert!(stderr.contains("\"service\":\"jupdate\""));
}

#[test]
fn test_rust_log_is_honored() {
    let temp_dir = tempdir().unwrap();

    base_jupdate_command(temp_dir.path())
        .arg("moods")
        .env("RUST_LOG", "info")
        .assert()
        .success()
        .stderr(predicate::str::contains("Starting jupdate"));
}

#[test]
fn test_invalid_log_format_is_rejected() {
    let temp_dir = tempdir().unwrap();

    base_jupdate_command(temp_dir.path())
        .args(["--log-format", "xml", "moods"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("possible values"));
}

#[test]
fn test_verbose_logs_do_not_contain_entry_text() {
    let temp_dir = tempdir().unwrap();
    let marker = "a private line about my day";

    base_jupdate_command(temp_dir.path())
        .args(["-v", "write", "--mood", "happy", "--content", marker])
        .assert()
        .success()
        .stderr(predicate::str::contains("CLI arguments"))
        .stderr(predicate::str::contains("[REDACTED]"))
        .stderr(predicate::str::contains(marker).not());
}
