//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while executing a circuit.
///
/// Every variant is terminal for the run: no counts or partial state are
/// returned alongside it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// An instruction references a qubit or bit outside the declared registers.
    #[error("Register index error: {0}")]
    RegisterIndex(#[from] qexec_ir::IrError),

    /// An instruction names an operation outside the supported gate set.
    #[error("Unsupported gate: {name}")]
    UnsupportedGate {
        /// Name of the rejected operation.
        name: String,
    },

    /// The circuit needs more qubits than the simulator is configured for.
    #[error("Circuit has {num_qubits} qubits, but the simulator supports at most {max_qubits}")]
    ResourceLimit {
        /// Qubits declared by the circuit.
        num_qubits: usize,
        /// Configured limit.
        max_qubits: usize,
    },

    /// The state norm drifted beyond tolerance; indicates a bug, not bad input.
    #[error("State norm drifted to {norm} after applying '{gate}'")]
    InternalNumeric {
        /// Squared norm observed after the step.
        norm: f64,
        /// Gate applied in that step.
        gate: String,
    },

    /// The probabilities could not be turned into a sampling distribution.
    #[error("Cannot sample from the outcome distribution: {reason}")]
    SamplingFailed {
        /// Why the distribution was rejected.
        reason: String,
    },

    /// Sampling mode requested from a build without the `sampling` feature.
    #[error("Shot sampling is not available in this build")]
    SamplingUnavailable,
}

impl SimError {
    /// Whether the error was caused by the submitted circuit rather than a bug.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            SimError::InternalNumeric { .. }
                | SimError::SamplingFailed { .. }
                | SimError::SamplingUnavailable
        )
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
