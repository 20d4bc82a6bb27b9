//! # VASTAV Scoring
//!
//! Deterministic rule set applied to every scan.
//!
//! ## Components
//!
//! | Component | Input | Output |
//! |-----------|-------|--------|
//! | [`detect_anomalies`] | [`ThreatReading`] | ordered [`AnomalyFlag`]s |
//! | [`rf_risk_tier`] | RF channel | [`RfRisk`] |
//! | [`compute_impact`] | [`EnvironmentReading`] | [`ImpactScore`] (PARINAAM) |
//!
//! All three are pure functions. They reject out-of-domain input with
//! [`ScoringError::InvalidReading`] instead of clamping it.
//!
//! ## Usage
//!
//! ```rust
//! use vastav_scoring::{compute_impact, detect_anomalies, rf_risk_tier, AnomalyFlag, ImpactLevel, RfRisk};
//! use vastav_sensors::{EnvironmentReading, ThreatReading};
//!
//! let reading = ThreatReading::new(0.1, 0.95, 0.95, true)?;
//! assert_eq!(detect_anomalies(&reading)?, vec![AnomalyFlag::Decoy]);
//! assert_eq!(rf_risk_tier(reading.rf)?, RfRisk::High);
//!
//! let impact = compute_impact(&EnvironmentReading::uniform(1.0)?)?;
//! assert_eq!((impact.score, impact.level), (100, ImpactLevel::High));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`ThreatReading`]: vastav_sensors::ThreatReading
//! [`EnvironmentReading`]: vastav_sensors::EnvironmentReading

pub mod anomaly;
pub mod error;
pub mod impact;
pub mod rf;

pub use anomaly::{detect_anomalies, AnomalyFlag};
pub use error::ScoringError;
pub use impact::{compute_impact, ImpactLevel, ImpactScore};
pub use rf::{rf_risk_tier, RfRisk};

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;
