//! Integration tests for the qexec HTTP API.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use qexec_server::{AppState, ModeArg, ServerConfig, create_router};
use serde_json::{Value, json};

// ============================================================================
// Test helpers
// ============================================================================

fn deterministic_config() -> ServerConfig {
    ServerConfig {
        mode: ModeArg::Deterministic,
        ..ServerConfig::default()
    }
}

fn test_server(config: ServerConfig) -> TestServer {
    let state = Arc::new(AppState::new(config).expect("app state"));
    TestServer::new(create_router(state)).expect("test server")
}

const BELL_QASM: &str = r#"OPENQASM 3;
include "stdgates.inc";
qubit[2] q;
bit[2] c;
h q[0];
cx q[0], q[1];
c = measure q;"#;

// ============================================================================
// Health endpoint
// ============================================================================

#[tokio::test]
async fn test_health_returns_ok() {
    let server = test_server(deterministic_config());
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mode"], "deterministic");
    assert_eq!(body["max_qubits"], 20);
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_health_reports_auto_mode() {
    let server = test_server(ServerConfig::default());
    let body: Value = server.get("/health").await.json();
    assert_eq!(
        body["mode"],
        qexec_sim::ExecutionMode::preferred().as_str()
    );
}

// ============================================================================
// Simulation
// ============================================================================

#[tokio::test]
async fn test_simulate_bell() {
    let server = test_server(deterministic_config());
    let response = server
        .post("/simulate")
        .json(&json!({ "qasm": BELL_QASM, "shots": 200 }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "00": 100, "11": 100 }));
}

#[tokio::test]
async fn test_simulate_uses_default_shots() {
    let server = test_server(deterministic_config());
    let response = server
        .post("/simulate")
        .json(&json!({ "qasm": "OPENQASM 3; qubit[3] q; h q[0]; h q[1]; h q[2];" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let counts = body.as_object().unwrap();
    assert_eq!(counts.len(), 8);
    assert!(counts.values().all(|v| v == 25));
}

#[tokio::test]
async fn test_simulate_is_reproducible() {
    let server = test_server(deterministic_config());
    let request = json!({ "qasm": "OPENQASM 3; qubit[2] q; ry(0.7) q[0]; cx q[0], q[1];", "shots": 999 });

    let first: Value = server.post("/simulate").json(&request).await.json();
    let second: Value = server.post("/simulate").json(&request).await.json();
    assert_eq!(first, second);

    let total: u64 = first
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(total, 999);
}

#[tokio::test]
async fn test_simulate_sampling_mode_with_seed() {
    let config = ServerConfig {
        mode: ModeArg::Auto,
        seed: Some(11),
        ..ServerConfig::default()
    };
    let server = test_server(config);
    let response = server
        .post("/simulate")
        .json(&json!({ "qasm": BELL_QASM, "shots": 500 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let counts = body.as_object().unwrap();
    assert!(counts.keys().all(|k| k == "00" || k == "11"));
    let total: u64 = counts.values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(total, 500);
}

// ============================================================================
// Request errors
// ============================================================================

#[tokio::test]
async fn test_missing_qasm() {
    let server = test_server(deterministic_config());
    for body in [json!({}), json!({ "qasm": "" }), json!({ "qasm": "   \n" })] {
        let response = server.post("/simulate").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Missing QASM code" }));
    }
}

#[tokio::test]
async fn test_invalid_shots() {
    let server = test_server(deterministic_config());
    for shots in [0_u64, 100_001] {
        let response = server
            .post("/simulate")
            .json(&json!({ "qasm": BELL_QASM, "shots": shots }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("shots"));
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let server = test_server(deterministic_config());
    let response = server.post("/simulate").text("not json").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_parse_error() {
    let server = test_server(deterministic_config());
    let response = server
        .post("/simulate")
        .json(&json!({ "qasm": "not valid qasm at all" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_gate() {
    let server = test_server(deterministic_config());
    let response = server
        .post("/simulate")
        .json(&json!({ "qasm": "OPENQASM 3; qubit[2] q; frobnicate q[0], q[1];" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Unsupported gate: frobnicate" }));
}

#[tokio::test]
async fn test_non_finite_angle_is_rejected() {
    let server = test_server(deterministic_config());
    let response = server
        .post("/simulate")
        .json(&json!({ "qasm": "OPENQASM 3; qubit q; bit c; rx(0/0) q; c = measure q;" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("non-finite"));
}

#[tokio::test]
async fn test_too_many_qubits() {
    let config = ServerConfig {
        max_qubits: 4,
        ..deterministic_config()
    };
    let server = test_server(config);
    let response = server
        .post("/simulate")
        .json(&json!({ "qasm": "OPENQASM 3; qubit[5] q; h q[0];" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("at most 4"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = test_server(deterministic_config());
    server.get("/nope").await.assert_status_not_found();
}
