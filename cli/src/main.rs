//! `fba-tools` command-line client
//!
//! Lists the remote methods, reports the service status and calls any
//! method by name with JSON parameters.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use anyhow::Context;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.global.resolve().context("Failed to load configuration")?;

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    cli::run(cli, config).await
}
