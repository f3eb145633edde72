//! # Nexus CLI Library
//!
//! Core library functionality for the `nexus` command-line tool: a small
//! client for the Sonatype Nexus REST API plus the GAV aggregation used to
//! summarise repository contents.

use clap::{Args, Parser};

pub mod artifact;
pub mod client;
pub mod commands;
pub mod config;
pub mod gav;
pub mod layout;
pub mod repository;
pub mod search;

/// Runs some queries against a Sonatype Nexus server
#[derive(Parser)]
#[command(
    name = "nexus",
    version,
    about = "Runs some queries against a Sonatype Nexus server",
    long_about = "Runs some queries against a Sonatype Nexus server.\n\nLists repositories, lists and searches artifacts, and counts the distinct\ngroup:artifact:version coordinates (GAVs) stored in a repository."
)]
pub struct Cli {
    #[command(flatten)]
    pub server: ServerArgs,

    /// Increase log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Option<commands::Commands>,
}

/// How to reach the Nexus server
#[derive(Args, Debug, Clone, Default)]
pub struct ServerArgs {
    /// Nexus' URL
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Name of a server from the servers file
    #[arg(short, long, global = true, conflicts_with = "url")]
    pub server: Option<String>,

    /// Username for basic auth (password read from the configured env var or prompted)
    #[arg(long, global = true)]
    pub user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::{artifacts::ArtifactsCommands, Commands};

    fn search_args(argv: &[&str]) -> commands::artifacts::SearchArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.cmd {
            Some(Commands::Artifacts {
                cmd: ArtifactsCommands::Search(args),
            }) => args,
            other => panic!("expected artifacts search, got {other:?}"),
        }
    }

    #[test]
    fn test_search_version_uses_long_flag() {
        let args = search_args(&[
            "nexus",
            "artifacts",
            "search",
            "-g",
            "com.a",
            "--artifact-version",
            "1.0",
        ]);
        assert_eq!(args.group.as_deref(), Some("com.a"));
        assert_eq!(args.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_short_v_stays_verbose() {
        let cli = Cli::try_parse_from(["nexus", "artifacts", "search", "-g", "com.a", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);

        // -v takes no value, so a stray version is rejected
        assert!(Cli::try_parse_from(["nexus", "artifacts", "search", "-g", "com.a", "-v", "1.0"]).is_err());
    }

    #[test]
    fn test_artifacts_short_alias() {
        let cli = Cli::try_parse_from(["nexus", "a", "count", "-r", "releases"]).unwrap();
        match cli.cmd {
            Some(Commands::Artifacts {
                cmd: ArtifactsCommands::Count(args),
            }) => assert_eq!(args.repository, "releases"),
            other => panic!("expected artifacts count, got {other:?}"),
        }
    }
}
