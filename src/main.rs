//! pulse: command line front end for the pulse-jira client.
//!
//! Every subcommand prints its result as pretty JSON on stdout. Diagnostics
//! go to stderr through `tracing`.

mod cli;

use std::env;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

const ENV_VERBOSITY: &str = "PULSE_VERBOSITY";

fn verbosity_to_level(verbosity: u8) -> Level {
  match verbosity {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  }
}

/// `-v` flags win; `PULSE_VERBOSITY` (0-3) applies when none are given.
fn init_tracing(verbose: u8) {
  let verbosity = if verbose > 0 {
    verbose
  } else {
    env::var(ENV_VERBOSITY)
      .ok()
      .and_then(|v| v.parse::<u8>().ok())
      .filter(|level| *level <= 3)
      .unwrap_or(0)
  };

  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_target(false)
    .with_env_filter(EnvFilter::default().add_directive(verbosity_to_level(verbosity).into()))
    .try_init()
    .ok();
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  cli.run().await
}
