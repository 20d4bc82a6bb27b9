//! Error types for the scoring engines.

use thiserror::Error;
use vastav_sensors::SensorError;

/// Errors raised by the scoring functions.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Input reading failed domain validation.
    #[error(transparent)]
    InvalidReading(#[from] SensorError),
}
