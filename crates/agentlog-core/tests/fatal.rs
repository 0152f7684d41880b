//! Fatal terminates the process, so it is checked from a child process that
//! re-runs this test binary.

use agentlog_core::Field;
use serde_json::Value;
use std::process::{Command, Stdio};

const CHILD_LOG_ENV: &str = "AGENTLOG_FATAL_CHILD_LOG";

#[test]
fn fatal_child() {
    let Ok(path) = std::env::var(CHILD_LOG_ENV) else {
        return;
    };
    agentlog_core::init("info", &path).unwrap();
    agentlog_core::fatal("Failed", &[Field::string("reason", "listener closed")]);
}

#[test]
fn test_fatal_writes_record_and_exits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fatal.log");

    let status = Command::new(std::env::current_exe().unwrap())
        .args(["--exact", "fatal_child", "--nocapture", "--test-threads=1"])
        .env(CHILD_LOG_ENV, &path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(agentlog_core::logger::FATAL_EXIT_CODE));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);

    let record: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(record["level"], "FATAL");
    assert_eq!(record["msg"], "Failed");
    assert_eq!(record["reason"], "listener closed");
    assert!(record.get("stacktrace").is_some());
}
