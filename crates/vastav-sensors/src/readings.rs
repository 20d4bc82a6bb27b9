//! Threat and environment reading types.

use serde::{Deserialize, Serialize};

use crate::{Result, SensorError};

/// Column names of the classifier feature vector, in order.
pub const FEATURE_NAMES: [&str; 4] = ["IR", "RF", "EM", "Vibration"];

/// One sample of the threat sensor head.
///
/// Produced once per scan and consumed by the classifier and the anomaly
/// rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreatReading {
    /// Infrared (thermal signature).
    pub ir: f64,
    /// Radio-frequency emission.
    pub rf: f64,
    /// Electromagnetic field strength.
    pub em: f64,
    /// Whether mechanical vibration was detected.
    pub vibration: bool,
}

impl ThreatReading {
    /// Creates a reading, rejecting out-of-domain values.
    pub fn new(ir: f64, rf: f64, em: f64, vibration: bool) -> Result<Self> {
        let reading = Self {
            ir,
            rf,
            em,
            vibration,
        };
        reading.validate()?;
        Ok(reading)
    }

    /// Checks every analogue channel is finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        check_unit("ir", self.ir)?;
        check_unit("rf", self.rf)?;
        check_unit("em", self.em)
    }

    /// Feature vector in [`FEATURE_NAMES`] order. Vibration maps to 1.0 / 0.0.
    pub fn features(&self) -> [f64; 4] {
        [
            self.ir,
            self.rf,
            self.em,
            if self.vibration { 1.0 } else { 0.0 },
        ]
    }
}

/// One sample of the environmental sensor head.
///
/// Only the impact scoring engine consumes these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReading {
    /// Surface heat, in `[0, 1]`.
    pub heat: f64,
    /// Smoke density, in `[0, 1]`.
    pub smoke: f64,
    /// Electromagnetic radiation, in `[0, 1]`.
    pub em_radiation: f64,
    /// Ionising radiation, in `[0, 1]`.
    pub radiation: f64,
    /// Sound level, in `[0, 1]`.
    pub sound: f64,
}

impl EnvironmentReading {
    /// Creates a reading, rejecting out-of-domain values.
    pub fn new(heat: f64, smoke: f64, em_radiation: f64, radiation: f64, sound: f64) -> Result<Self> {
        let reading = Self {
            heat,
            smoke,
            em_radiation,
            radiation,
            sound,
        };
        reading.validate()?;
        Ok(reading)
    }

    /// Every channel set to `value`. Handy for calibration and tests.
    pub fn uniform(value: f64) -> Result<Self> {
        Self::new(value, value, value, value, value)
    }

    /// Checks every channel is finite and within `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (channel, value) in self.channels() {
            check_unit(channel, value)?;
        }
        Ok(())
    }

    /// Channel names paired with their values.
    pub fn channels(&self) -> [(&'static str, f64); 5] {
        [
            ("heat", self.heat),
            ("smoke", self.smoke),
            ("em_radiation", self.em_radiation),
            ("radiation", self.radiation),
            ("sound", self.sound),
        ]
    }
}

fn check_unit(channel: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SensorError::InvalidReading { channel, value })
    }
}
