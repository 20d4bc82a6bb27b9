//! Error types for sensor acquisition and reading validation.

use thiserror::Error;

/// Errors produced while acquiring or validating sensor readings.
#[derive(Debug, Error)]
pub enum SensorError {
    /// A channel value fell outside `[0, 1]` or was not finite.
    #[error("invalid reading: {channel} = {value} is outside [0, 1]")]
    InvalidReading {
        /// Channel name (e.g. `"rf"`, `"smoke"`).
        channel: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The acquisition backend failed to produce a reading.
    #[error("sensor acquisition failed: {0}")]
    Acquisition(String),
}
