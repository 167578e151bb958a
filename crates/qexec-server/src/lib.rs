//! qexec HTTP service.
//!
//! Accepts OpenQASM 3 programs over HTTP and answers with measurement
//! counts from the statevector simulator.
//!
//! | Route | Method | Body |
//! |-------|--------|------|
//! | `/simulate` | POST | `{"qasm": "...", "shots": 200}` → `{"00": 100, "11": 100}` |
//! | `/health` | GET | → `{"status": "ok", "version": ..., "mode": ..., "max_qubits": ...}` |
//!
//! Errors are returned as `{"error": "..."}` with status 400, or 500 for
//! internal failures.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use qexec_server::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     serve(ServerConfig::default()).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod server;
pub mod state;
pub mod tracing_config;

pub use config::{ConfigError, LogFormat, ModeArg, ServerConfig};
pub use dto::{HealthResponse, SimulateRequest};
pub use error::ApiError;
pub use server::{create_router, serve};
pub use state::AppState;
pub use tracing_config::init_tracing;
