//! Statevector simulation core for qexec.
//!
//! Turns a [`qexec_ir::Circuit`] and a shot count into a measurement
//! histogram:
//!
//! 1. [`Statevector::evolve`] applies every unitary instruction to |0...0⟩.
//!    Measurements are not simulated as collapses; outcomes are read from
//!    the final amplitudes.
//! 2. [`Probabilities::from_statevector`] takes |amplitude|² per basis state,
//!    dropping values at or below [`PROBABILITY_EPSILON`].
//! 3. A sampler turns probabilities into [`Counts`] that sum to the shot
//!    count: [`DeterministicSampler`] by rounding, or `ShotSampler` (feature
//!    `sampling`) by random draws.
//!
//! [`Executor`] runs the whole pipeline with an explicit [`ExecutionMode`].
//!
//! # Example
//!
//! ```rust
//! use qexec_ir::Circuit;
//! use qexec_sim::{Executor, SimulatorConfig};
//!
//! let executor = Executor::deterministic(SimulatorConfig::default());
//! let counts = executor.execute(&Circuit::bell().unwrap(), 200).unwrap();
//!
//! assert_eq!(counts.get("00"), 100);
//! assert_eq!(counts.get("11"), 100);
//! ```

pub mod counts;
pub mod error;
pub mod executor;
pub mod probability;
pub mod sampler;
pub mod statevector;

pub use counts::Counts;
pub use error::{SimError, SimResult};
pub use executor::{DEFAULT_MAX_QUBITS, ExecutionMode, Executor, SimulatorConfig};
pub use probability::{PROBABILITY_EPSILON, Probabilities, bitstring};
pub use sampler::DeterministicSampler;
#[cfg(feature = "sampling")]
pub use sampler::ShotSampler;
pub use statevector::{MAX_STATEVECTOR_QUBITS, NORM_TOLERANCE, Statevector};
