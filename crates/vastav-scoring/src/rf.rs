//! RF risk tiering.

use serde::{Deserialize, Serialize};
use vastav_sensors::SensorError;

use crate::Result;

/// RF level above which risk is high.
pub const RF_HIGH_MIN: f64 = 0.75;

/// RF level above which risk is medium.
pub const RF_MEDIUM_MIN: f64 = 0.4;

/// Three-level risk tier derived from the RF channel.
///
/// Variants are ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RfRisk {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RfRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Maps an RF value to its risk tier.
///
/// `rf > 0.75` is high, `0.4 < rf <= 0.75` is medium, anything else low.
/// Boundaries belong to the lower tier.
pub fn rf_risk_tier(rf: f64) -> Result<RfRisk> {
    if !rf.is_finite() || !(0.0..=1.0).contains(&rf) {
        return Err(SensorError::InvalidReading {
            channel: "rf",
            value: rf,
        }
        .into());
    }

    Ok(if rf > RF_HIGH_MIN {
        RfRisk::High
    } else if rf > RF_MEDIUM_MIN {
        RfRisk::Medium
    } else {
        RfRisk::Low
    })
}
