//! Search criteria for the Nexus Lucene search endpoint

use anyhow::{bail, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criteria {
    /// Everything stored in the given repository
    ByRepository(String),
    /// Free-text search
    ByKeyword(String),
    /// Any combination of Maven coordinates
    ByCoordinates(Coordinates),
    /// Another criteria, restricted to one repository
    InRepository(String, Box<Criteria>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coordinates {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub classifier: Option<String>,
    pub packaging: Option<String>,
}

impl Coordinates {
    pub fn is_empty(&self) -> bool {
        self.group_id.is_none()
            && self.artifact_id.is_none()
            && self.version.is_none()
            && self.classifier.is_none()
            && self.packaging.is_none()
    }
}

impl Criteria {
    /// Builds criteria from optional CLI filters
    ///
    /// Fails when nothing at all was given to search for.
    pub fn from_filters(
        repository: Option<String>,
        keyword: Option<String>,
        coordinates: Coordinates,
    ) -> Result<Self> {
        let inner = match (keyword, coordinates.is_empty()) {
            (Some(_), false) => bail!("Use either a keyword or coordinates, not both"),
            (Some(kw), true) => Some(Criteria::ByKeyword(kw)),
            (None, false) => Some(Criteria::ByCoordinates(coordinates)),
            (None, true) => None,
        };

        match (repository, inner) {
            (Some(repo), Some(inner)) => Ok(Criteria::InRepository(repo, Box::new(inner))),
            (Some(repo), None) => Ok(Criteria::ByRepository(repo)),
            (None, Some(inner)) => Ok(inner),
            (None, None) => {
                bail!("Nothing to search for: give a repository, a keyword or coordinates")
            }
        }
    }

    /// Query parameters understood by `/service/local/lucene/search`
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Criteria::ByRepository(repo) => vec![("repositoryId", repo.clone())],
            Criteria::ByKeyword(kw) => vec![("q", kw.clone())],
            Criteria::ByCoordinates(c) => {
                let mut params = Vec::new();
                let fields = [
                    ("g", &c.group_id),
                    ("a", &c.artifact_id),
                    ("v", &c.version),
                    ("c", &c.classifier),
                    ("p", &c.packaging),
                ];
                for (name, value) in fields {
                    if let Some(v) = value {
                        params.push((name, v.clone()));
                    }
                }
                params
            }
            Criteria::InRepository(repo, inner) => {
                let mut params = inner.query_params();
                params.retain(|(name, _)| *name != "repositoryId");
                params.push(("repositoryId", repo.clone()));
                params
            }
        }
    }

    /// The repository results must come from, if any
    pub fn repository(&self) -> Option<&str> {
        match self {
            Criteria::ByRepository(repo) | Criteria::InRepository(repo, _) => Some(repo.as_str()),
            _ => None,
        }
    }
}
