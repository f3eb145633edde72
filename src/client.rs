//! HTTP client for the Nexus 2.x REST API

use crate::{
    artifact::Artifact,
    config::{AuthConfig, ServerConfig},
    layout,
    repository::Repository,
    search::Criteria,
};
use dialoguer::Password;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, StatusCode,
};
use serde::Deserialize;
use std::{env, io::IsTerminal};
use thiserror::Error;

/// Hits requested per search page
pub const PAGE_SIZE: usize = 200;

#[derive(Error, Debug)]
pub enum NexusError {
    #[error("Nexus configuration error: {0}")]
    Configuration(String),

    #[error("Nexus request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Nexus returned {status} for {url}: {body}")]
    Status {
        status: StatusCode,
        url: String,
        body: String,
    },

    #[error("Invalid response from Nexus: {0}")]
    InvalidResponse(String),
}

pub struct NexusClient {
    pub base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct RepositoriesResponse {
    data: Vec<Repository>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    total_count: usize,
    #[serde(default)]
    too_many_results: bool,
    #[serde(default)]
    data: Vec<Option<SearchHit>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    group_id: String,
    artifact_id: String,
    version: String,
    #[serde(default)]
    artifact_hits: Vec<ArtifactHit>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactHit {
    repository_id: String,
    #[serde(default)]
    artifact_links: Vec<ArtifactLink>,
}

#[derive(Deserialize)]
struct ArtifactLink {
    #[serde(default)]
    classifier: Option<String>,
    #[serde(default)]
    extension: String,
}

/// A `/content/` directory listing
#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    data: Vec<ContentItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentItem {
    relative_path: String,
    #[serde(default)]
    leaf: bool,
}

impl SearchHit {
    /// One artifact per file link, optionally limited to one repository
    fn into_artifacts(self, repository: Option<&str>, out: &mut Vec<Artifact>) {
        for hit in self.artifact_hits {
            if repository.is_some_and(|r| r != hit.repository_id) {
                continue;
            }
            for link in hit.artifact_links {
                out.push(Artifact {
                    group_id: self.group_id.clone(),
                    artifact_id: self.artifact_id.clone(),
                    version: self.version.clone(),
                    classifier: link.classifier.filter(|c| !c.is_empty()),
                    extension: link.extension,
                    repository_id: hit.repository_id.clone(),
                });
            }
        }
    }
}

impl NexusClient {
    pub fn new(cfg: &ServerConfig) -> Result<Self, NexusError> {
        let base_url = cfg.url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(NexusError::Configuration("empty server URL".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        match &cfg.auth {
            AuthConfig::None => {}
            AuthConfig::Basic {
                username,
                password_env,
            } => {
                let pw = password_from_env(username, password_env)?;
                let token = base64::encode_config(format!("{}:{}", username, pw), base64::STANDARD);
                let mut hv = HeaderValue::from_str(&format!("Basic {}", token))
                    .map_err(|e| NexusError::Configuration(e.to_string()))?;
                hv.set_sensitive(true);
                headers.insert(AUTHORIZATION, hv);
            }
        }

        let client = Client::builder().default_headers(headers).build()?;
        tracing::debug!(url = %base_url, "created Nexus client");
        Ok(NexusClient { base_url, client })
    }

    /// All repositories known to the server, in the server's order
    pub async fn repositories(&self) -> Result<Vec<Repository>, NexusError> {
        let url = format!("{}/service/local/repositories", self.base_url);
        let resp: RepositoriesResponse = self.get_json(&url, &[]).await?;
        tracing::info!(count = resp.data.len(), "fetched repositories");
        Ok(resp.data)
    }

    /// Every artifact matching `criteria`
    ///
    /// The search endpoint needs a query term, so a bare repository is read
    /// by walking its content tree instead.
    pub async fn artifacts(&self, criteria: &Criteria) -> Result<Vec<Artifact>, NexusError> {
        let artifacts = match criteria {
            Criteria::ByRepository(repository) => self.walk_repository(repository).await?,
            _ => self.search(criteria).await?,
        };
        tracing::info!(count = artifacts.len(), "fetched artifacts");
        Ok(artifacts)
    }

    /// Depth-first walk of `/content/`, in listing order
    async fn walk_repository(&self, repository: &str) -> Result<Vec<Artifact>, NexusError> {
        let root = format!(
            "{}/service/local/repositories/{}/content",
            self.base_url, repository
        );

        let mut artifacts = Vec::new();
        let mut pending = vec!["/".to_string()];
        while let Some(dir) = pending.pop() {
            let listing: ContentResponse = self.get_json(&format!("{root}{dir}"), &[]).await?;
            tracing::debug!(dir = %dir, entries = listing.data.len(), "listed directory");

            let mut subdirs = Vec::new();
            for item in listing.data {
                let mut path = item.relative_path;
                if !path.starts_with('/') {
                    path.insert(0, '/');
                }
                if item.leaf {
                    match layout::parse_path(&path, repository) {
                        Some(artifact) => artifacts.push(artifact),
                        None => tracing::debug!(path = %path, "skipping non-artifact file"),
                    }
                } else if !path.split('/').any(|s| s.starts_with('.')) {
                    if !path.ends_with('/') {
                        path.push('/');
                    }
                    subdirs.push(path);
                }
            }
            pending.extend(subdirs.into_iter().rev());
        }

        Ok(artifacts)
    }

    /// Lucene search, following pagination
    async fn search(&self, criteria: &Criteria) -> Result<Vec<Artifact>, NexusError> {
        let url = format!("{}/service/local/lucene/search", self.base_url);
        let base_params = criteria.query_params();
        let repository = criteria.repository();

        let mut artifacts = Vec::new();
        let mut seen_hits = 0;
        let mut truncated = false;
        loop {
            let mut params = base_params.clone();
            params.push(("from", seen_hits.to_string()));
            params.push(("count", PAGE_SIZE.to_string()));

            let page: SearchResponse = self.get_json(&url, &params).await?;
            tracing::debug!(
                from = seen_hits,
                hits = page.data.len(),
                total = page.total_count,
                "fetched search page"
            );
            truncated |= page.too_many_results;
            let page_hits = page.data.len();
            if page_hits == 0 {
                break;
            }

            for (offset, hit) in page.data.into_iter().enumerate() {
                let hit = hit.ok_or_else(|| {
                    NexusError::InvalidResponse(format!(
                        "null search hit at position {}",
                        seen_hits + offset
                    ))
                })?;
                hit.into_artifacts(repository, &mut artifacts);
            }
            seen_hits += page_hits;
            if seen_hits >= page.total_count {
                break;
            }
        }

        if truncated {
            tracing::warn!("Nexus reported too many results; the listing may be incomplete");
        }
        Ok(artifacts)
    }

    async fn get_json<T>(&self, url: &str, params: &[(&str, String)]) -> Result<T, NexusError>
    where
        T: for<'de> Deserialize<'de>,
    {
        tracing::debug!(url, ?params, "GET");
        let resp = self.client.get(url).query(params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(NexusError::Status {
                status,
                url: url.to_string(),
                body,
            });
        }

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| NexusError::InvalidResponse(e.to_string()))
    }
}

fn password_from_env(username: &str, password_env: &str) -> Result<String, NexusError> {
    if let Ok(pw) = env::var(password_env) {
        return Ok(pw);
    }
    if !std::io::stdin().is_terminal() {
        return Err(NexusError::Configuration(format!(
            "password for '{}' not found: set {}",
            username, password_env
        )));
    }
    Password::new()
        .with_prompt(format!("Password for {username}"))
        .interact()
        .map_err(|e| NexusError::Configuration(e.to_string()))
}
