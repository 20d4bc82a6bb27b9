//! # Impact Scoring Engine
//!
//! Computes the PARINAAM score: a weighted composite of the five
//! environmental channels scaled to `[0, 100]`.
//!
//! | Channel | Weight |
//! |---------|--------|
//! | heat | 0.25 |
//! | smoke | 0.25 |
//! | EM radiation | 0.20 |
//! | radiation | 0.15 |
//! | sound | 0.15 |
//!
//! ## Rounding
//!
//! The weighted percentage is rounded half-up. A tolerance of
//! [`ROUNDING_EPSILON`] is added before flooring so that ties which binary
//! floats represent as `x.4999999…` still round up. It sits well above the
//! error of five products summed and scaled, and well below any real
//! fractional part, so `x.4999999996` still rounds down.
//!
//! ## Severity
//!
//! `score > 80` is high, `score > 40` medium, anything else low. The
//! boundary scores 80 and 40 belong to the lower tier.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vastav_sensors::EnvironmentReading;

use crate::Result;

pub const HEAT_WEIGHT: f64 = 0.25;
pub const SMOKE_WEIGHT: f64 = 0.25;
pub const EM_RADIATION_WEIGHT: f64 = 0.20;
pub const RADIATION_WEIGHT: f64 = 0.15;
pub const SOUND_WEIGHT: f64 = 0.15;

/// Score above which impact is high.
pub const HIGH_IMPACT_MIN: u8 = 80;

/// Score above which impact is medium.
pub const MEDIUM_IMPACT_MIN: u8 = 40;

/// Tolerance applied before half-up rounding.
pub const ROUNDING_EPSILON: f64 = 1e-12;

/// Severity tier of an impact score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    /// Tier for a rounded score.
    pub fn from_score(score: u8) -> Self {
        if score > HIGH_IMPACT_MIN {
            Self::High
        } else if score > MEDIUM_IMPACT_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Environmental impact of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactScore {
    /// Composite score in `[0, 100]`.
    pub score: u8,
    /// Severity tier of `score`.
    pub level: ImpactLevel,
}

/// Computes the weighted impact score of `env`.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidReading`](crate::ScoringError::InvalidReading)
/// if any channel is outside `[0, 1]`.
pub fn compute_impact(env: &EnvironmentReading) -> Result<ImpactScore> {
    env.validate()?;

    let weighted = HEAT_WEIGHT * env.heat
        + SMOKE_WEIGHT * env.smoke
        + EM_RADIATION_WEIGHT * env.em_radiation
        + RADIATION_WEIGHT * env.radiation
        + SOUND_WEIGHT * env.sound;

    let score = round_half_up(weighted * 100.0).min(100.0) as u8;
    let level = ImpactLevel::from_score(score);

    debug!(weighted, score, %level, "impact computed");
    Ok(ImpactScore { score, level })
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5 + ROUNDING_EPSILON).floor()
}
