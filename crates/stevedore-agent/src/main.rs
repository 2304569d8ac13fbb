//! # stevedore-agent
//!
//! Container launch agent: composes a job's declared specification and an
//! image's embedded configuration into the create request handed to the
//! container runtime.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries the create request JSON.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    cli::execute(&cli)
}
