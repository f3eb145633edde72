//! GAV (group/artifact/version) aggregation
//!
//! A repository search returns one [`Artifact`] per file, so a single
//! release usually shows up several times (jar, sources, javadoc, pom...).
//! [`gavs_of`] folds such a flat list into one [`Gav`] per distinct
//! coordinate, keeping every file that belongs to it.
//!
//! Output order is the order in which each coordinate was first seen, and
//! within a [`Gav`] the artifacts keep their input order.

use crate::artifact::Artifact;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GavError {
    #[error("missing artifact record at position {index}")]
    MissingArtifact { index: usize },
}

/// Identity of a GAV
///
/// Lookups compare the three fields directly, so a `:` inside a field can
/// never make two different coordinates collide. The `g:a:v` string from
/// [`fmt::Display`] is for humans only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GavKey {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl GavKey {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        GavKey {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    pub fn of(artifact: &Artifact) -> Self {
        GavKey::new(
            artifact.group_id.as_str(),
            artifact.artifact_id.as_str(),
            artifact.version.as_str(),
        )
    }
}

impl fmt::Display for GavKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A group/artifact/version coordinate together with all of its files
#[derive(Debug, Clone)]
pub struct Gav {
    key: GavKey,
    artifacts: Vec<Artifact>,
}

impl Gav {
    fn new(key: GavKey) -> Self {
        Gav {
            key,
            artifacts: Vec::new(),
        }
    }

    pub fn key(&self) -> &GavKey {
        &self.key
    }

    pub fn group_id(&self) -> &str {
        &self.key.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.key.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.key.version
    }

    /// Files mapped to this coordinate, in the order they were encountered
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.artifacts
    }

    fn add(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }
}

/// Two GAVs are the same coordinate regardless of their members
impl PartialEq for Gav {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Gav {}

impl fmt::Display for Gav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}

/// Insertion-ordered set of GAVs
///
/// `index` maps each key to its slot in `data`; `data` only ever grows, so
/// slots stay valid and iteration follows first-seen order.
#[derive(Debug, Default)]
pub struct GavSet {
    data: Vec<Gav>,
    index: HashMap<GavKey, usize>,
}

impl GavSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files `artifact` under its coordinate, creating the GAV on first sight
    pub fn insert(&mut self, artifact: Artifact) {
        let key = GavKey::of(&artifact);
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.data.len();
                self.index.insert(key.clone(), slot);
                self.data.push(Gav::new(key));
                slot
            }
        };
        self.data[slot].add(artifact);
    }

    pub fn get(&self, key: &GavKey) -> Option<&Gav> {
        self.index.get(key).map(|&slot| &self.data[slot])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Gav> {
        self.data.iter()
    }

    pub fn into_vec(self) -> Vec<Gav> {
        self.data
    }
}

impl Extend<Artifact> for GavSet {
    fn extend<I: IntoIterator<Item = Artifact>>(&mut self, iter: I) {
        for artifact in iter {
            self.insert(artifact);
        }
    }
}

impl FromIterator<Artifact> for GavSet {
    fn from_iter<I: IntoIterator<Item = Artifact>>(iter: I) -> Self {
        let mut set = GavSet::new();
        set.extend(iter);
        set
    }
}

/// Groups `artifacts` by coordinate, in first-seen order
pub fn gavs_of<I>(artifacts: I) -> Vec<Gav>
where
    I: IntoIterator<Item = Artifact>,
{
    artifacts.into_iter().collect::<GavSet>().into_vec()
}

/// Like [`gavs_of`], for inputs where a record may be absent
///
/// The first `None` aborts the whole aggregation; nothing is returned for
/// the records seen before it.
pub fn try_gavs_of<I>(records: I) -> Result<Vec<Gav>, GavError>
where
    I: IntoIterator<Item = Option<Artifact>>,
{
    let mut set = GavSet::new();
    for (index, record) in records.into_iter().enumerate() {
        let artifact = record.ok_or(GavError::MissingArtifact { index })?;
        set.insert(artifact);
    }
    Ok(set.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(g: &str, a: &str, v: &str) -> Artifact {
        Artifact::new(g, a, v).with_extension("jar")
    }

    #[test]
    fn test_empty_input() {
        assert!(gavs_of(Vec::new()).is_empty());
    }

    #[test]
    fn test_variants_share_one_gav() {
        let jar = art("com.a", "x", "1.0");
        let sources = art("com.a", "x", "1.0").with_classifier("sources");

        let gavs = gavs_of(vec![jar.clone(), sources.clone()]);

        assert_eq!(gavs.len(), 1);
        assert_eq!(gavs[0].to_string(), "com.a:x:1.0");
        assert_eq!(gavs[0].artifacts(), &[jar, sources]);
    }

    #[test]
    fn test_first_appearance_order() {
        let gavs = gavs_of(vec![
            art("com.a", "x", "1.0"),
            art("com.b", "y", "2.0"),
            art("com.a", "x", "1.0").with_extension("pom"),
        ]);

        let keys: Vec<String> = gavs.iter().map(|g| g.to_string()).collect();
        assert_eq!(keys, vec!["com.a:x:1.0", "com.b:y:2.0"]);
        assert_eq!(gavs[0].artifacts().len(), 2);
        assert_eq!(gavs[0].artifacts()[1].extension, "pom");
        assert_eq!(gavs[1].artifacts().len(), 1);
    }

    #[test]
    fn test_many_artifacts_single_coordinate() {
        let input: Vec<Artifact> = (0..100)
            .map(|i| art("com.a", "x", "1.0").with_classifier(format!("c{i}")))
            .collect();

        let gavs = gavs_of(input.clone());

        assert_eq!(gavs.len(), 1);
        assert_eq!(gavs[0].artifacts(), input.as_slice());
    }

    #[test]
    fn test_all_distinct() {
        let input = vec![
            art("com.a", "x", "1.0"),
            art("com.a", "x", "1.1"),
            art("com.a", "y", "1.0"),
            art("com.b", "x", "1.0"),
        ];

        let gavs = gavs_of(input);

        assert_eq!(gavs.len(), 4);
        assert!(gavs.iter().all(|g| g.artifacts().len() == 1));
    }

    #[test]
    fn test_empty_fields() {
        let gavs = gavs_of(vec![Artifact::new("", "", "")]);
        assert_eq!(gavs.len(), 1);
        assert_eq!(gavs[0].key().to_string(), "::");
        assert_eq!(gavs[0].artifacts().len(), 1);
    }

    #[test]
    fn test_identical_duplicates_are_kept() {
        let a = art("com.a", "x", "1.0");
        let gavs = gavs_of(vec![a.clone(), a.clone()]);
        assert_eq!(gavs.len(), 1);
        assert_eq!(gavs[0].artifacts(), &[a.clone(), a]);
    }

    #[test]
    fn test_key_is_case_sensitive_and_untrimmed() {
        let gavs = gavs_of(vec![
            art("com.a", "x", "1.0"),
            art("COM.A", "x", "1.0"),
            art("com.a ", "x", "1.0"),
        ]);
        assert_eq!(gavs.len(), 3);
    }

    #[test]
    fn test_delimiter_inside_fields_does_not_collide() {
        // both render as "a:b:c:d" but are different coordinates
        let gavs = gavs_of(vec![art("a:b", "c", "d"), art("a", "b:c", "d")]);
        assert_eq!(gavs.len(), 2);
        assert_eq!(gavs[0].to_string(), gavs[1].to_string());
        assert_ne!(gavs[0], gavs[1]);
    }

    #[test]
    fn test_gav_equality_ignores_members() {
        let one = gavs_of(vec![art("com.a", "x", "1.0")]);
        let two = gavs_of(vec![art("com.a", "x", "1.0"), art("com.a", "x", "1.0")]);
        assert_eq!(one[0], two[0]);
    }

    #[test]
    fn test_set_lookup() {
        let set: GavSet = vec![art("com.a", "x", "1.0"), art("com.b", "y", "2.0")]
            .into_iter()
            .collect();

        assert_eq!(set.len(), 2);
        let gav = set.get(&GavKey::new("com.b", "y", "2.0")).unwrap();
        assert_eq!(gav.artifact_id(), "y");
        assert!(set.get(&GavKey::new("com.c", "z", "3.0")).is_none());
    }

    #[test]
    fn test_try_gavs_of_accepts_complete_input() {
        let records = vec![Some(art("com.a", "x", "1.0")), Some(art("com.a", "x", "1.0"))];
        let gavs = try_gavs_of(records).unwrap();
        assert_eq!(gavs.len(), 1);
        assert_eq!(gavs[0].artifacts().len(), 2);
    }

    #[test]
    fn test_try_gavs_of_rejects_missing_record() {
        let records = vec![
            Some(art("com.a", "x", "1.0")),
            None,
            Some(art("com.b", "y", "1.0")),
        ];
        let err = try_gavs_of(records).unwrap_err();
        assert_eq!(err, GavError::MissingArtifact { index: 1 });
        assert_eq!(err.to_string(), "missing artifact record at position 1");
    }
}
