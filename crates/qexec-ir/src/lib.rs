//! qexec Circuit Model
//!
//! This crate provides the data structures shared by the whole qexec stack:
//! register layout, instructions and the unitaries of the supported gate set.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Instruction`]s plus the registers
//! they address. Indices are checked on every append, so a circuit built
//! through the builder API never references an undeclared qubit or bit.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] and [`Register`]
//! - **Gates**: [`StandardGate`] for the supported gate set, each carrying its
//!   unitary and arity, and [`OpaqueGate`] for named operations outside it
//! - **Instructions**: [`Instruction`] combining a gate, measurement or barrier
//!   with its operands
//! - **Circuit**: [`Circuit`] builder API
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qexec_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.unitary_ops().count(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I`, `X`, `Y`, `Z` | 1 | Identity and Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `SX`, `SXdg` | 1 | Square root of X |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `U` | 1 | Universal single-qubit gate U(θ,φ,λ) |
//! | `CX`, `CY`, `CZ`, `CH` | 2 | Controlled Paulis and Hadamard |
//! | `Swap`, `ISwap` | 2 | Swap gates |
//! | `CRx`, `CRy`, `CRz`, `CP` | 2 | Controlled rotations |
//! | `CCX`, `CSwap` | 3 | Toffoli and Fredkin |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{GateKind, GateMatrix, OpaqueGate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId, Register, RegisterKind};
