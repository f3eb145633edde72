use crate::{
    artifact::Artifact,
    commands::connect,
    gav::{gavs_of, Gav},
    search::{Coordinates, Criteria},
    ServerArgs,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum ArtifactsCommands {
    /// Counts the artifacts and GAVs in a given repository
    #[command(visible_alias = "c")]
    Count(RepositoryArgs),
    /// Lists the artifacts and GAVs in a given repository
    #[command(visible_alias = "l")]
    List {
        #[command(flatten)]
        repo: RepositoryArgs,
        /// Group the listing by GAV
        #[arg(long)]
        gavs: bool,
    },
    /// Searches artifacts by keyword or coordinates
    #[command(visible_alias = "s")]
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct RepositoryArgs {
    /// The repository to inspect
    #[arg(short, long)]
    pub repository: String,
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Only search this repository
    #[arg(short, long)]
    pub repository: Option<String>,
    /// Free-text keyword
    #[arg(short, long)]
    pub keyword: Option<String>,
    /// Group ID
    #[arg(short, long)]
    pub group: Option<String>,
    /// Artifact ID
    #[arg(short, long)]
    pub artifact: Option<String>,
    /// Exact version
    #[arg(long = "artifact-version")]
    pub version: Option<String>,
    #[arg(short, long)]
    pub classifier: Option<String>,
    #[arg(short, long)]
    pub packaging: Option<String>,
}

impl SearchArgs {
    pub fn criteria(self) -> Result<Criteria> {
        Criteria::from_filters(
            self.repository,
            self.keyword,
            Coordinates {
                group_id: self.group,
                artifact_id: self.artifact,
                version: self.version,
                classifier: self.classifier,
                packaging: self.packaging,
            },
        )
    }
}

pub async fn run(cmd: ArtifactsCommands, server: &ServerArgs) -> Result<()> {
    let client = connect(server)?;

    match cmd {
        ArtifactsCommands::Count(args) => {
            println!("{} @ {}", args.repository, client.base_url);
            let artifacts = client
                .artifacts(&Criteria::ByRepository(args.repository))
                .await?;
            println!("\t{} artifacts", artifacts.len());
            let gavs = gavs_of(artifacts);
            println!("\t{} GAVs", gavs.len());
        }
        ArtifactsCommands::List { repo, gavs } => {
            println!("{} @ {}", repo.repository, client.base_url);
            let artifacts = client
                .artifacts(&Criteria::ByRepository(repo.repository))
                .await?;
            println!("\t{} artifacts", artifacts.len());
            if gavs {
                let gavs = gavs_of(artifacts);
                println!("\t{} GAVs", gavs.len());
                print!("{}", render_gavs(&gavs));
            } else {
                print!("{}", render_artifacts(&artifacts));
            }
        }
        ArtifactsCommands::Search(args) => {
            let criteria = args.criteria()?;
            tracing::debug!(?criteria, "searching");
            let artifacts = client.artifacts(&criteria).await?;
            println!("{} artifacts @ {}", artifacts.len(), client.base_url);
            print!("{}", render_artifacts(&artifacts));
            println!("{} GAVs", gavs_of(artifacts).len());
        }
    }

    Ok(())
}

pub fn render_artifacts(artifacts: &[Artifact]) -> String {
    artifacts.iter().map(|a| format!("{a}\n")).collect()
}

/// Each GAV on its own line with its files indented below it
pub fn render_gavs(gavs: &[Gav]) -> String {
    let mut out = String::new();
    for gav in gavs {
        let n = gav.artifacts().len();
        let files = if n == 1 { "file" } else { "files" };
        out.push_str(&format!("{gav} ({n} {files})\n"));
        for artifact in gav.artifacts() {
            out.push_str(&format!("\t{artifact}\n"));
        }
    }
    out
}
