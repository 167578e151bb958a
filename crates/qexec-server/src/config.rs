//! Server configuration.
//!
//! Every option can be given on the command line or through a `QEXEC_*`
//! environment variable; the command line wins.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use qexec_sim::{DEFAULT_MAX_QUBITS, ExecutionMode, SimulatorConfig};
use thiserror::Error;

/// Shots used when a request does not specify any.
pub const DEFAULT_SHOTS: u64 = 200;

/// Upper bound on shots per request.
pub const DEFAULT_MAX_SHOTS: u64 = 100_000;

/// Hard ceiling for `--max-qubits` (2^30 amplitudes is 16 GiB).
pub const MAX_SUPPORTED_QUBITS: usize = 30;

/// Execution mode as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Shot sampling if compiled in, deterministic otherwise.
    Auto,
    /// Randomized shot sampling.
    Sampling,
    /// Rounded, reproducible counts.
    Deterministic,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable output.
    Console,
    /// One JSON object per event.
    Json,
}

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--max-shots must be at least 1")]
    ZeroMaxShots,

    #[error("--default-shots must be between 1 and --max-shots ({max_shots}), got {default_shots}")]
    DefaultShots { default_shots: u64, max_shots: u64 },

    #[error("--max-qubits must be between 1 and {max}, got {0}", max = MAX_SUPPORTED_QUBITS)]
    MaxQubits(usize),

    #[error("--request-timeout-secs must be at least 1")]
    ZeroTimeout,

    #[error("--mode sampling requires a build with the `sampling` feature")]
    SamplingUnavailable,
}

/// qexec HTTP simulation service
#[derive(Debug, Clone, Parser)]
#[command(name = "qexec-server")]
#[command(version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "QEXEC_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Shots used when a request omits them
    #[arg(long, env = "QEXEC_DEFAULT_SHOTS", default_value_t = DEFAULT_SHOTS)]
    pub default_shots: u64,

    /// Largest shot count a request may ask for
    #[arg(long, env = "QEXEC_MAX_SHOTS", default_value_t = DEFAULT_MAX_SHOTS)]
    pub max_shots: u64,

    /// Largest circuit (in qubits) the simulator accepts
    #[arg(long, env = "QEXEC_MAX_QUBITS", default_value_t = DEFAULT_MAX_QUBITS)]
    pub max_qubits: usize,

    /// How counts are produced
    #[arg(long, env = "QEXEC_MODE", value_enum, default_value_t = ModeArg::Auto)]
    pub mode: ModeArg,

    /// Seed for shot sampling (fresh entropy per request if unset)
    #[arg(long, env = "QEXEC_SEED")]
    pub seed: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long, env = "QEXEC_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "QEXEC_LOG_FORMAT", value_enum, default_value_t = LogFormat::Console)]
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: ([127, 0, 0, 1], 5000).into(),
            default_shots: DEFAULT_SHOTS,
            max_shots: DEFAULT_MAX_SHOTS,
            max_qubits: DEFAULT_MAX_QUBITS,
            mode: ModeArg::Auto,
            seed: None,
            request_timeout_secs: 30,
            log_format: LogFormat::Console,
        }
    }
}

impl ServerConfig {
    /// Check value ranges and feature availability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_shots == 0 {
            return Err(ConfigError::ZeroMaxShots);
        }
        if self.default_shots == 0 || self.default_shots > self.max_shots {
            return Err(ConfigError::DefaultShots {
                default_shots: self.default_shots,
                max_shots: self.max_shots,
            });
        }
        if self.max_qubits == 0 || self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(ConfigError::MaxQubits(self.max_qubits));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.mode == ModeArg::Sampling && !ExecutionMode::SAMPLING_AVAILABLE {
            return Err(ConfigError::SamplingUnavailable);
        }
        Ok(())
    }

    /// The execution mode, with `auto` resolved for this build.
    pub fn execution_mode(&self) -> ExecutionMode {
        match self.mode {
            ModeArg::Auto => ExecutionMode::preferred(),
            ModeArg::Sampling => ExecutionMode::Sampling,
            ModeArg::Deterministic => ExecutionMode::Deterministic,
        }
    }

    /// Simulator settings derived from this configuration.
    pub fn simulator_config(&self) -> SimulatorConfig {
        let config = SimulatorConfig::default().with_max_qubits(self.max_qubits);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind.port(), 5000);
        assert_eq!(config.default_shots, 200);
        assert_eq!(config.execution_mode(), ExecutionMode::preferred());
    }

    #[test]
    fn test_parse_flags() {
        let config = ServerConfig::try_parse_from([
            "qexec-server",
            "--bind",
            "0.0.0.0:8080",
            "--max-qubits",
            "12",
            "--mode",
            "deterministic",
            "--seed",
            "9",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.max_qubits, 12);
        assert_eq!(config.execution_mode(), ExecutionMode::Deterministic);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.simulator_config().seed, Some(9));
        assert_eq!(config.simulator_config().max_qubits, 12);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(ServerConfig::try_parse_from(["qexec-server", "--mode", "quantum"]).is_err());
    }

    #[test]
    fn test_validate_ranges() {
        let config = ServerConfig {
            default_shots: 500,
            max_shots: 100,
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DefaultShots { .. })
        ));

        let config = ServerConfig {
            max_qubits: 31,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MaxQubits(31))));

        let config = ServerConfig {
            request_timeout_secs: 0,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }
}
