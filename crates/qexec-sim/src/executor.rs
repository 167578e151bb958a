//! The circuit → counts pipeline.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qexec_ir::Circuit;

use crate::counts::Counts;
use crate::error::{SimError, SimResult};
use crate::probability::Probabilities;
use crate::sampler::DeterministicSampler;
use crate::statevector::Statevector;

/// Default upper bound on simulated qubits (2^20 amplitudes, 16 MiB).
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// How counts are derived from the exact distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Draw independent random shots (requires the `sampling` feature).
    Sampling,
    /// Round probabilities to counts; reproducible bit for bit.
    Deterministic,
}

impl ExecutionMode {
    /// Whether shot sampling was compiled into this build.
    pub const SAMPLING_AVAILABLE: bool = cfg!(feature = "sampling");

    /// The best mode this build supports.
    pub const fn preferred() -> Self {
        if Self::SAMPLING_AVAILABLE {
            ExecutionMode::Sampling
        } else {
            ExecutionMode::Deterministic
        }
    }

    /// Mode name as used in configuration and responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionMode::Sampling => "sampling",
            ExecutionMode::Deterministic => "deterministic",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sampling" => Ok(ExecutionMode::Sampling),
            "deterministic" => Ok(ExecutionMode::Deterministic),
            other => Err(format!(
                "unknown execution mode '{other}' (expected sampling or deterministic)"
            )),
        }
    }
}

/// Simulator limits and sampling options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Circuits with more qubits are rejected before any allocation.
    pub max_qubits: usize,
    /// Fixed seed for shot sampling; `None` draws from OS entropy per run.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Set the qubit limit.
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Runs circuits through evolution, probability extraction and counting.
///
/// Holds configuration only; every call to [`Executor::execute`] works on
/// its own state, so one executor can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Executor {
    mode: ExecutionMode,
    config: SimulatorConfig,
}

impl Executor {
    /// Create an executor for the given mode.
    ///
    /// Fails with [`SimError::SamplingUnavailable`] if sampling is requested
    /// from a build without the `sampling` feature.
    pub fn new(mode: ExecutionMode, config: SimulatorConfig) -> SimResult<Self> {
        if mode == ExecutionMode::Sampling && !ExecutionMode::SAMPLING_AVAILABLE {
            return Err(SimError::SamplingUnavailable);
        }
        Ok(Self { mode, config })
    }

    /// Create a deterministic executor; always available.
    pub fn deterministic(config: SimulatorConfig) -> Self {
        Self {
            mode: ExecutionMode::Deterministic,
            config,
        }
    }

    /// Get the execution mode.
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run `circuit` and return `shots` counts.
    ///
    /// Counts sum to exactly `shots` (empty for `shots == 0`); validating
    /// the shot count is the caller's job.
    #[instrument(skip(self, circuit), fields(mode = %self.mode, num_qubits = circuit.num_qubits()))]
    pub fn execute(&self, circuit: &Circuit, shots: u64) -> SimResult<Counts> {
        let start = Instant::now();

        let probabilities = self.probabilities(circuit)?;
        debug!("{} outcomes with non-zero probability", probabilities.len());

        let counts = match self.mode {
            ExecutionMode::Deterministic => DeterministicSampler.sample(&probabilities, shots),
            ExecutionMode::Sampling => self.sample_shots(&probabilities, shots)?,
        };

        debug!("Execution completed in {:?}", start.elapsed());
        Ok(counts)
    }

    /// Evolve `circuit` and return its exact outcome distribution.
    pub fn probabilities(&self, circuit: &Circuit) -> SimResult<Probabilities> {
        let num_qubits = circuit.num_qubits();
        if num_qubits > self.config.max_qubits {
            return Err(SimError::ResourceLimit {
                num_qubits,
                max_qubits: self.config.max_qubits,
            });
        }
        circuit.validate()?;

        let state = Statevector::evolve(circuit)?;
        Ok(Probabilities::from_statevector(&state))
    }

    #[cfg(feature = "sampling")]
    fn sample_shots(&self, probabilities: &Probabilities, shots: u64) -> SimResult<Counts> {
        use crate::sampler::ShotSampler;

        let mut sampler = match self.config.seed {
            Some(seed) => ShotSampler::seeded(seed),
            None => ShotSampler::from_entropy(),
        };
        sampler.sample(probabilities, shots)
    }

    #[cfg(not(feature = "sampling"))]
    fn sample_shots(&self, _probabilities: &Probabilities, _shots: u64) -> SimResult<Counts> {
        Err(SimError::SamplingUnavailable)
    }
}
