//! Binary crate for the `localweather` panel.
//!
//! This crate focuses on:
//! - Wiring the data sources together in order
//! - Drawing the panel in the terminal
//! - Logging setup

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod render;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cmd = cli::Cli::parse();
    cmd.run().await
}

/// Logs go to stderr and stay quiet unless `RUST_LOG` asks for more.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
