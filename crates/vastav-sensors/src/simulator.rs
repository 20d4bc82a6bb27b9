//! Sensor capability traits and the uniform simulator.
//!
//! A real deployment swaps [`UniformSimulator`] for a driver that talks to
//! the sensor head; the scanner only sees the two traits below.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{EnvironmentReading, Result, SensorError, ThreatReading};

/// Upper bound for every channel of a suppressed environment reading.
pub const SUPPRESSED_CEILING: f64 = 0.2;

/// Anything that can produce a [`ThreatReading`] on demand.
pub trait ThreatSensor {
    fn read_threat(&mut self) -> Result<ThreatReading>;
}

/// Anything that can produce an [`EnvironmentReading`] on demand.
pub trait EnvironmentSensor {
    fn read_environment(&mut self, profile: EnvironmentProfile) -> Result<EnvironmentReading>;
}

/// Range the environment channels are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
    /// Full `[0, 1]` range.
    Ambient,
    /// Every channel within `[0, SUPPRESSED_CEILING]`.
    Suppressed,
}

impl EnvironmentProfile {
    /// Inclusive upper bound for channel values under this profile.
    pub fn ceiling(self) -> f64 {
        match self {
            Self::Ambient => 1.0,
            Self::Suppressed => SUPPRESSED_CEILING,
        }
    }

    /// Checks `reading` is in domain and no channel exceeds this profile's ceiling.
    pub fn check(self, reading: &EnvironmentReading) -> Result<()> {
        reading.validate()?;
        let ceiling = self.ceiling();
        match reading.channels().into_iter().find(|(_, value)| *value > ceiling) {
            Some((channel, value)) => Err(SensorError::InvalidReading { channel, value }),
            None => Ok(()),
        }
    }
}

/// Draws every channel uniformly, rounded to two decimals.
#[derive(Debug, Clone)]
pub struct UniformSimulator {
    rng: StdRng,
}

impl Default for UniformSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSimulator {
    /// Creates a simulator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible simulator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn draw(&mut self, ceiling: f64) -> f64 {
        round2(self.rng.gen_range(0.0..=ceiling))
    }
}

impl ThreatSensor for UniformSimulator {
    fn read_threat(&mut self) -> Result<ThreatReading> {
        let reading = ThreatReading {
            ir: self.draw(1.0),
            rf: self.draw(1.0),
            em: self.draw(1.0),
            vibration: self.rng.gen_bool(0.5),
        };
        debug!(?reading, "simulated threat reading");
        Ok(reading)
    }
}

impl EnvironmentSensor for UniformSimulator {
    fn read_environment(&mut self, profile: EnvironmentProfile) -> Result<EnvironmentReading> {
        let ceiling = profile.ceiling();
        let reading = EnvironmentReading {
            heat: self.draw(ceiling),
            smoke: self.draw(ceiling),
            em_radiation: self.draw(ceiling),
            radiation: self.draw(ceiling),
            sound: self.draw(ceiling),
        };
        debug!(?profile, ?reading, "simulated environment reading");
        Ok(reading)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
