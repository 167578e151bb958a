//! Application state shared by all handlers.

use qexec_sim::{Executor, SimResult};

use crate::config::ServerConfig;

/// Shared application state.
///
/// Read-only after startup; each request evolves its own statevector.
#[derive(Debug)]
pub struct AppState {
    /// Simulator with the mode resolved at startup.
    pub executor: Executor,
    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Build the state, resolving the execution mode once.
    pub fn new(config: ServerConfig) -> SimResult<Self> {
        let executor = Executor::new(config.execution_mode(), config.simulator_config())?;
        Ok(Self { executor, config })
    }
}
