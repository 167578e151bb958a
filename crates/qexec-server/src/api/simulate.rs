//! Simulation endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::info;

use qexec_sim::Counts;

use crate::dto::SimulateRequest;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /simulate - Parse a QASM program and return measurement counts.
///
/// Responds with a flat `{"bitstring": count}` object on success.
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulateRequest>, JsonRejection>,
) -> Result<Json<Counts>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let qasm = request
        .qasm
        .filter(|source| !source.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing QASM code".to_string()))?;

    let max_shots = state.config.max_shots;
    let shots = request.shots.unwrap_or(state.config.default_shots);
    if shots == 0 || shots > max_shots {
        return Err(ApiError::BadRequest(format!(
            "shots must be between 1 and {max_shots}, got {shots}"
        )));
    }

    // Parsing and evolution are CPU-bound; keep them off the async workers.
    let worker = Arc::clone(&state);
    let counts = tokio::task::spawn_blocking(move || -> Result<Counts, ApiError> {
        let circuit = qexec_qasm3::parse(&qasm)?;
        info!(
            num_qubits = circuit.num_qubits(),
            num_instructions = circuit.instructions().len(),
            shots,
            "Simulating circuit"
        );
        Ok(worker.executor.execute(&circuit, shots)?)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Simulation task failed: {e}")))??;

    Ok(Json(counts))
}
