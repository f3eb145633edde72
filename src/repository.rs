use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A repository as reported by `/service/local/repositories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,
    pub name: String,
    /// `hosted`, `proxy`, `group` or `virtual`
    #[serde(rename = "repoType", default)]
    pub repo_type: String,
    #[serde(default)]
    pub format: String,
    #[serde(rename = "repoPolicy", default)]
    pub policy: Option<String>,
    /// Upstream URL; only proxy repositories have one
    #[serde(default)]
    pub remote_uri: Option<String>,
    #[serde(rename = "contentResourceURI", default)]
    pub content_uri: Option<String>,
}

impl Repository {
    pub fn is_proxy(&self) -> bool {
        self.remote_uri.as_deref().is_some_and(|uri| !uri.is_empty())
    }

    pub fn is_hosted(&self) -> bool {
        self.repo_type == "hosted"
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.id, self.repo_type)
    }
}

/// hosted < group/virtual < proxy, then by name
pub fn display_order(a: &Repository, b: &Repository) -> Ordering {
    a.is_proxy()
        .cmp(&b.is_proxy())
        .then_with(|| b.is_hosted().cmp(&a.is_hosted()))
        .then_with(|| a.name.cmp(&b.name))
}

pub fn sort_for_display(repos: &mut [Repository]) {
    repos.sort_by(display_order);
}
