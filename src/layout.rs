//! Maven 2 repository layout
//!
//! Turns a file path inside a repository, such as
//! `/com/example/core/1.0/core-1.0-sources.jar`, back into an [`Artifact`].

use crate::artifact::Artifact;
use regex::Regex;
use std::sync::OnceLock;

/// Files that sit next to artifacts but are not artifacts themselves
const SIDECAR_EXTENSIONS: &[&str] = &["sha1", "md5", "sha256", "sha512", "asc"];

fn snapshot_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // timestamped snapshot builds: 20240102.030405-7
    RE.get_or_init(|| Regex::new(r"^\d{8}\.\d{6}-\d+").expect("snapshot pattern is valid"))
}

/// Parses `path` as `group/path/artifactId/version/fileName`
///
/// Returns `None` for anything that is not an artifact file: metadata,
/// checksums, signatures, hidden directories, or paths too short to hold a
/// group.
pub fn parse_path(path: &str, repository_id: &str) -> Option<Artifact> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 4 || segments.iter().any(|s| s.starts_with('.')) {
        return None;
    }

    let n = segments.len();
    let file_name = segments[n - 1];
    let version = segments[n - 2];
    let artifact_id = segments[n - 3];
    let group_id = segments[..n - 3].join(".");

    let rest = file_name.strip_prefix(artifact_id)?.strip_prefix('-')?;
    let rest = strip_version(rest, version)?;

    let (classifier, extension) = if let Some(ext) = rest.strip_prefix('.') {
        (None, ext)
    } else {
        let qualified = rest.strip_prefix('-')?;
        let (classifier, ext) = qualified.split_once('.')?;
        (Some(classifier), ext)
    };

    let last = extension.rsplit('.').next().unwrap_or(extension);
    if extension.is_empty() || SIDECAR_EXTENSIONS.contains(&last) {
        return None;
    }

    let mut artifact = Artifact::new(group_id, artifact_id, version)
        .with_extension(extension)
        .with_repository(repository_id);
    if let Some(c) = classifier.filter(|c| !c.is_empty()) {
        artifact = artifact.with_classifier(c);
    }
    Some(artifact)
}

/// Strips the version from the front of a file name remainder
///
/// Snapshot directories (`1.0-SNAPSHOT`) may hold either the literal
/// version or timestamped builds (`1.0-20240102.030405-7`).
fn strip_version<'a>(rest: &'a str, version: &str) -> Option<&'a str> {
    if let Some(after) = rest.strip_prefix(version) {
        return Some(after);
    }
    let base = version.strip_suffix("-SNAPSHOT")?;
    let stamped = rest.strip_prefix(base)?.strip_prefix('-')?;
    let m = snapshot_regex().find(stamped)?;
    Some(&stamped[m.end()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_jar() {
        let a = parse_path("/com/example/core/1.0/core-1.0.jar", "releases").unwrap();
        assert_eq!(a.to_string(), "com.example:core:1.0:jar");
        assert_eq!(a.repository_id, "releases");
    }

    #[test]
    fn test_classifier_and_compound_extension() {
        let a = parse_path("/org/acme/dist/2.1/dist-2.1-bin.tar.gz", "r").unwrap();
        assert_eq!(a.classifier.as_deref(), Some("bin"));
        assert_eq!(a.extension, "tar.gz");

        let a = parse_path("/org/acme/dist/2.1/dist-2.1.tar.gz", "r").unwrap();
        assert_eq!(a.classifier, None);
        assert_eq!(a.extension, "tar.gz");
    }

    #[test]
    fn test_timestamped_snapshot_keeps_directory_version() {
        let a = parse_path(
            "/com/example/core/1.0-SNAPSHOT/core-1.0-20240102.030405-7-sources.jar",
            "snapshots",
        )
        .unwrap();
        assert_eq!(a.version, "1.0-SNAPSHOT");
        assert_eq!(a.classifier.as_deref(), Some("sources"));
        assert_eq!(a.extension, "jar");
    }

    #[test]
    fn test_non_artifacts_are_skipped() {
        for path in [
            "/com/example/core/maven-metadata.xml",
            "/com/example/core/1.0/core-1.0.jar.sha1",
            "/com/example/core/1.0/core-1.0.pom.asc",
            "/com/example/core/1.0/other-1.0.jar",
            "/.index/nexus-maven-repository-index.gz",
            "/core/1.0/core-1.0.jar",
        ] {
            assert!(parse_path(path, "r").is_none(), "{path}");
        }
    }
}
