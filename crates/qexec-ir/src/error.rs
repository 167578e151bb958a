//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors raised while building or validating a circuit.
///
/// Every variant is a register-index problem in the broad sense: an
/// instruction that does not fit the declared register layout.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside every declared quantum register.
    #[error(
        "Qubit {qubit} is out of range (circuit has {num_qubits} qubits){}",
        format_gate_context(.gate_name)
    )]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of declared qubits.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit index outside every declared classical register.
    #[error(
        "Classical bit {clbit} is out of range (circuit has {num_clbits} bits){}",
        format_gate_context(.gate_name)
    )]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of declared classical bits.
        num_clbits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Gate requires a different number of parameters.
    #[error("Gate '{gate_name}' expects {expected} parameters, got {got}")]
    ParameterCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of parameters.
        expected: usize,
        /// Actual number of parameters provided.
        got: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Measurement with mismatched qubit and bit lists.
    #[error("measure: qubit count ({qubits}) does not match bit count ({clbits})")]
    MeasureArity {
        /// Number of measured qubits.
        qubits: usize,
        /// Number of target bits.
        clbits: usize,
    },

    /// A register name was declared twice.
    #[error("Register '{0}' is already declared")]
    DuplicateRegister(String),

    /// A register does not fit the contiguous index layout.
    #[error("Register '{name}' is inconsistent with the register layout: {reason}")]
    RegisterLayout {
        /// Register name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A gate parameter is NaN or infinite.
    #[error("Gate '{gate_name}' has a non-finite parameter ({value})")]
    NonFiniteParameter {
        /// Name of the gate.
        gate_name: String,
        /// The offending value.
        value: f64,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
