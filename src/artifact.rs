use serde::{Deserialize, Serialize};
use std::fmt;

/// A single retrievable file stored in a Nexus repository
///
/// Several artifacts usually share the same group/artifact/version: the jar,
/// its sources and javadoc bundles, the pom, and so on. They differ only in
/// `classifier` and `extension`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Variant qualifier such as `sources` or `javadoc`
    #[serde(default)]
    pub classifier: Option<String>,
    /// File extension / packaging, e.g. `jar` or `pom`
    #[serde(default)]
    pub extension: String,
    /// ID of the repository holding this file
    #[serde(default)]
    pub repository_id: String,
}

impl Artifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Artifact {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier: None,
            extension: String::new(),
            repository_id: String::new(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn with_repository(mut self, repository_id: impl Into<String>) -> Self {
        self.repository_id = repository_id.into();
        self
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.version, self.extension
        )?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}
