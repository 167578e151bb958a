//! Request and response bodies.

use serde::{Deserialize, Serialize};

use qexec_sim::ExecutionMode;

/// Body of `POST /simulate`.
#[derive(Debug, Default, Deserialize)]
pub struct SimulateRequest {
    /// OpenQASM 3 source.
    #[serde(default)]
    pub qasm: Option<String>,
    /// Number of shots; the server default applies when absent.
    #[serde(default)]
    pub shots: Option<u64>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub mode: ExecutionMode,
    pub max_qubits: usize,
}

impl HealthResponse {
    /// Healthy response for a server running in `mode`.
    pub fn ok(mode: ExecutionMode, max_qubits: usize) -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            mode,
            max_qubits,
        }
    }
}
