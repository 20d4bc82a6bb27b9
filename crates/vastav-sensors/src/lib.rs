//! # VASTAV Sensors
//!
//! Reading types and acquisition for the suspicious-object scanner.
//!
//! ## Channels
//!
//! | Group | Channels | Consumer |
//! |-------|----------|----------|
//! | Threat | infrared, radio frequency, electromagnetic, vibration | Classifier, anomaly rules |
//! | Environment | heat, smoke, EM radiation, radiation, sound | Impact scoring |
//!
//! Every analogue channel is a normalized float in `[0, 1]`. Readings are
//! never clamped: a value outside its domain is an upstream bug and is
//! rejected by [`ThreatReading::validate`] / [`EnvironmentReading::validate`].
//!
//! ## Acquisition
//!
//! Hardware is abstracted behind two capability traits, [`ThreatSensor`] and
//! [`EnvironmentSensor`]. The bundled [`UniformSimulator`] implements both
//! and stands in for a real sensor head.
//!
//! ```rust
//! use vastav_sensors::{EnvironmentProfile, EnvironmentSensor, ThreatSensor, UniformSimulator};
//!
//! let mut sim = UniformSimulator::with_seed(7);
//! let threat = sim.read_threat()?;
//! let env = sim.read_environment(EnvironmentProfile::Suppressed)?;
//!
//! assert!(threat.validate().is_ok());
//! assert!(env.heat <= 0.2);
//! # Ok::<(), vastav_sensors::SensorError>(())
//! ```

mod error;
mod readings;
mod simulator;

pub use error::SensorError;
pub use readings::{EnvironmentReading, ThreatReading, FEATURE_NAMES};
pub use simulator::{
    EnvironmentProfile, EnvironmentSensor, ThreatSensor, UniformSimulator, SUPPRESSED_CEILING,
};

/// Result type for sensor operations.
pub type Result<T> = std::result::Result<T, SensorError>;
