use crate::{commands::connect, repository::sort_for_display, ServerArgs};
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum RepositoriesCommands {
    /// Lists the repositories (hosted first, then groups, then proxies)
    #[command(visible_alias = "l")]
    List,
}

pub async fn run(cmd: RepositoriesCommands, server: &ServerArgs) -> Result<()> {
    let client = connect(server)?;

    match cmd {
        RepositoriesCommands::List => {
            let mut repos = client.repositories().await?;
            println!("{} repositories in {}:", repos.len(), client.base_url);
            sort_for_display(&mut repos);
            for repo in &repos {
                println!("\t{repo}");
            }
        }
    }

    Ok(())
}
