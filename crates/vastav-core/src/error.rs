//! Error types for VASTAV Core.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for a scan cycle.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Sensor acquisition or reading validation failed.
    #[error("Sensor error: {0}")]
    Sensor(#[from] vastav_sensors::SensorError),

    /// Classifier passthrough (includes model unavailability).
    #[error("Classifier error: {0}")]
    Classifier(#[from] vastav_classifier::ClassifierError),

    /// Scoring passthrough.
    #[error("Scoring error: {0}")]
    Scoring(#[from] vastav_scoring::ScoringError),

    /// Ledger could not be opened.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures of the scan ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A record could not be persisted.
    #[error("failed to write scan record to {}: {source}", .path.display())]
    LogWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded.
    #[error("failed to encode scan record: {0}")]
    Encode(#[from] serde_json::Error),

    /// The ledger file could not be opened or read.
    #[error("ledger I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored line did not parse as a scan record.
    #[error("corrupt ledger entry at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    /// The ledger lock was poisoned by a panicking writer.
    #[error("ledger lock poisoned")]
    Poisoned,
}
