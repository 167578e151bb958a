//! qexec-server binary entry point.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;

use qexec_server::{ServerConfig, init_tracing, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_tracing(config.log_format)?;
    config.validate()?;

    serve(config).await
}
