//! Error types for the classifier.

use std::path::PathBuf;

use thiserror::Error;
use vastav_sensors::SensorError;

/// Errors raised while loading, training or running the classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// No usable model artifact at the configured location.
    #[error("model unavailable at {}: {reason}", .path.display())]
    ModelUnavailable {
        /// Artifact path that was tried.
        path: PathBuf,
        /// Why it could not be used.
        reason: String,
    },

    /// Reading failed domain validation.
    #[error(transparent)]
    InvalidReading(#[from] SensorError),

    /// A training-data row could not be parsed.
    #[error("dataset line {line}: {reason}")]
    Dataset {
        /// 1-based line number, header included.
        line: usize,
        reason: String,
    },

    /// Training was requested on zero samples.
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_display() {
        let err = ClassifierError::ModelUnavailable {
            path: PathBuf::from("models/classifier.json"),
            reason: "not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("models/classifier.json"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_dataset_display() {
        let err = ClassifierError::Dataset {
            line: 7,
            reason: "expected 5 fields".to_string(),
        };
        assert!(err.to_string().contains("line 7"));
    }
}
