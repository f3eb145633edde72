use crate::{client::NexusClient, config::load_servers_config, ServerArgs};
use anyhow::Result;
use clap::Subcommand;

pub mod artifacts;
pub mod completions;
pub mod repositories;
pub mod servers;

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        visible_alias = "a",
        about = "Commands concerning the artifacts and GAVs in a given repository"
    )]
    Artifacts {
        #[command(subcommand)]
        cmd: artifacts::ArtifactsCommands,
    },
    #[command(
        visible_alias = "repos",
        about = "Commands concerning repositories"
    )]
    Repositories {
        #[command(subcommand)]
        cmd: repositories::RepositoriesCommands,
    },
    #[command(about = "Manage the named servers file (list/add/remove/default)")]
    Servers {
        #[command(subcommand)]
        cmd: servers::ServersCommands,
    },
    #[command(about = "Emit shell completion scripts (bash/zsh/fish)")]
    Completions { shell: String },
}

pub async fn run(cmd: Commands, server: &ServerArgs) -> Result<()> {
    match cmd {
        Commands::Artifacts { cmd } => artifacts::run(cmd, server).await,
        Commands::Repositories { cmd } => repositories::run(cmd, server).await,
        Commands::Servers { cmd } => servers::run(cmd),
        Commands::Completions { shell } => completions::run(shell),
    }
}

/// Resolves `--url`/`--server`/`--user` against the servers file and connects
pub(crate) fn connect(args: &ServerArgs) -> Result<NexusClient> {
    let servers = load_servers_config()?;
    let server = servers.resolve(
        args.url.as_deref(),
        args.server.as_deref(),
        args.user.as_deref(),
    )?;
    Ok(NexusClient::new(&server)?)
}
