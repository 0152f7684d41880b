//! The global tracing bridge. Installing a global subscriber is a one-shot
//! process action, so this binary holds a single test.

use agentlog_core::bridge::install_tracing_bridge;
use agentlog_core::LoggerError;
use serde_json::Value;

#[test]
fn test_bridge_routes_tracing_events_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bridge.log");
    agentlog_core::init("info", path.to_str().unwrap()).unwrap();

    install_tracing_bridge().unwrap();
    assert!(matches!(
        install_tracing_bridge(),
        Err(LoggerError::Subscriber(_))
    ));

    tracing::debug!("below threshold");
    tracing::warn!(peer = "10.0.0.7", retries = 3u64, "connection flapping");
    agentlog_core::sync();

    let content = std::fs::read_to_string(&path).unwrap();
    let records: Vec<Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "WARN");
    assert_eq!(records[0]["msg"], "connection flapping");
    assert_eq!(records[0]["peer"], "10.0.0.7");
    assert_eq!(records[0]["retries"], 3);
    assert_eq!(records[0]["logger"], module_path!());
    assert!(records[0]["caller"]
        .as_str()
        .unwrap()
        .starts_with("tests/tracing_bridge.rs:"));
}
