//! # Nexus CLI
//!
//! Command-line tool that runs queries against a Sonatype Nexus server.
//!
//! ## Quick Start
//!
//! ```bash
//! # List the repositories of a server
//! nexus --url http://localhost:8081/nexus repositories list
//!
//! # Count artifacts and GAVs in a repository
//! nexus --url http://localhost:8081/nexus artifacts count -r releases
//!
//! # Save a server once, then refer to it by name
//! nexus servers add
//! nexus --server corp artifacts list -r releases --gavs
//! ```
//!
//! ## Configuration
//!
//! Named servers are stored in `~/.config/nexus-cli/servers.yaml`, or the
//! path given by `NEXUS_CLI_SERVERS_PATH`. Logging goes to stderr and is
//! controlled by `-v` or the `NEXUS_CLI_LOG` filter.

use anyhow::Result;
use clap::Parser;
use nexus_cli::{commands, Cli};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NEXUS_CLI_LOG";

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main entry point for the Nexus CLI
///
/// Parses command-line arguments and delegates to the appropriate command handler.
/// If no command is provided, displays an error message and exits.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let cmd = cli.cmd.unwrap_or_else(|| {
        eprintln!("No command provided. Use --help to see available commands.");
        std::process::exit(1);
    });
    commands::run(cmd, &cli.server).await
}
