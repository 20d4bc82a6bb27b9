//! On-disk model artifacts.
//!
//! An artifact is a pretty-printed JSON document holding a fitted
//! [`DecisionTree`] plus enough metadata to reject files that were not
//! produced for this feature layout. The SHA-256 of the file bytes is the
//! model fingerprint recorded with every scan.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;
use vastav_sensors::FEATURE_NAMES;

use crate::{ClassifierError, DecisionTree, Result};

/// Current artifact format version.
pub const ARTIFACT_FORMAT: u32 = 1;

/// Serialized form of a fitted classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format: u32,
    /// Feature names in vector order; must equal [`FEATURE_NAMES`].
    pub features: Vec<String>,
    pub trained_samples: usize,
    pub trained_at: DateTime<Utc>,
    pub tree: DecisionTree,
}

impl ModelArtifact {
    /// Wraps a freshly fitted tree.
    pub fn new(tree: DecisionTree, trained_samples: usize) -> Self {
        Self {
            format: ARTIFACT_FORMAT,
            features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            trained_samples,
            trained_at: Utc::now(),
            tree,
        }
    }

    /// Writes the artifact, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(self)?;
        fs::write(path, &bytes)?;
        info!(
            path = %path.display(),
            fingerprint = %fingerprint(&bytes),
            "model artifact saved"
        );
        Ok(())
    }

    /// Reads and checks an artifact, returning it with its fingerprint.
    ///
    /// # Errors
    ///
    /// Every failure, including a missing file, is
    /// [`ClassifierError::ModelUnavailable`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Self, String)> {
        let path = path.as_ref();
        let unavailable = |reason: String| ClassifierError::ModelUnavailable {
            path: PathBuf::from(path),
            reason,
        };

        let bytes = fs::read(path).map_err(|e| unavailable(e.to_string()))?;
        let artifact: Self =
            serde_json::from_slice(&bytes).map_err(|e| unavailable(format!("malformed artifact: {}", e)))?;

        if artifact.format != ARTIFACT_FORMAT {
            return Err(unavailable(format!(
                "unsupported format {} (expected {})",
                artifact.format, ARTIFACT_FORMAT
            )));
        }
        if artifact.features.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
            return Err(unavailable(format!(
                "feature layout {:?} does not match {:?}",
                artifact.features, FEATURE_NAMES
            )));
        }
        artifact.tree.validate().map_err(unavailable)?;

        Ok((artifact, fingerprint(&bytes)))
    }
}

/// Lowercase hex SHA-256 of `bytes`.
pub fn fingerprint(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Label, Node};

    fn stump() -> DecisionTree {
        DecisionTree::from_root(Node::Split {
            feature: 3,
            threshold: 0.5,
            left: Box::new(Node::Leaf { label: Label::Fake, samples: 2 }),
            right: Box::new(Node::Leaf { label: Label::Real, samples: 2 }),
        })
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models/classifier.json");

        let artifact = ModelArtifact::new(stump(), 4);
        artifact.save(&path).unwrap();

        let (loaded, fp) = ModelArtifact::load(&path).unwrap();
        assert_eq!(loaded, artifact);
        assert_eq!(fp.len(), 64);
        assert_eq!(fp, fingerprint(&fs::read(&path).unwrap()));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelArtifact::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ClassifierError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_garbage_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.pkl");
        fs::write(&path, b"\x80\x04\x95not json").unwrap();
        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::ModelUnavailable { .. }));
    }

    #[test]
    fn test_wrong_format_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        let mut artifact = ModelArtifact::new(stump(), 4);
        artifact.format = 99;
        fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported format"));
    }

    #[test]
    fn test_wrong_features_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classifier.json");
        let mut artifact = ModelArtifact::new(stump(), 4);
        artifact.features.reverse();
        fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();

        assert!(ModelArtifact::load(&path).is_err());
    }

    #[test]
    fn test_fingerprint_is_stable() {
        assert_eq!(fingerprint(b"vastav"), fingerprint(b"vastav"));
        assert_ne!(fingerprint(b"vastav"), fingerprint(b"vastav "));
    }
}
