//! Anomaly rule engine.
//!
//! Heuristic predicates over a threat reading that flag spoofed or
//! physically implausible signatures. Rules are independent and evaluated
//! in a fixed order; a reading may raise any subset of flags.
//!
//! | Order | Flag | Predicate |
//! |-------|------|-----------|
//! | 1 | `decoy` | (`rf > 0.6` or `em > 0.6`) and `ir < 0.2` |
//! | 2 | `spoofed-silent` | every channel zero, no vibration |
//! | 3 | `overload` | `ir`, `rf`, `em` all `> 0.9` |

use serde::{Deserialize, Serialize};
use tracing::debug;
use vastav_sensors::ThreatReading;

use crate::Result;

/// RF or EM level above which an emitting signal is considered present.
pub const DECOY_SIGNAL_MIN: f64 = 0.6;

/// IR level below which there is no thermal signature.
pub const DECOY_THERMAL_MAX: f64 = 0.2;

/// Level every channel must exceed for the overload rule.
pub const OVERLOAD_MIN: f64 = 0.9;

/// Named anomaly raised by the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyFlag {
    /// Signal present without a thermal signature.
    Decoy,
    /// All channels silent.
    SpoofedSilent,
    /// Simultaneous saturation across channels.
    Overload,
}

impl AnomalyFlag {
    /// Wire identifier, as written to the scan log.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decoy => "decoy",
            Self::SpoofedSilent => "spoofed-silent",
            Self::Overload => "overload",
        }
    }

    /// Operator-facing explanation.
    pub fn description(self) -> &'static str {
        match self {
            Self::Decoy => "RF/EM signal without thermal signature",
            Self::SpoofedSilent => "all channels silent, possible spoofed sensor",
            Self::Overload => "all channels saturated, implausible for a real object",
        }
    }
}

impl std::fmt::Display for AnomalyFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

type Rule = (AnomalyFlag, fn(&ThreatReading) -> bool);

const RULES: [Rule; 3] = [
    (AnomalyFlag::Decoy, is_decoy),
    (AnomalyFlag::SpoofedSilent, is_spoofed_silent),
    (AnomalyFlag::Overload, is_overload),
];

fn is_decoy(r: &ThreatReading) -> bool {
    (r.rf > DECOY_SIGNAL_MIN || r.em > DECOY_SIGNAL_MIN) && r.ir < DECOY_THERMAL_MAX
}

fn is_spoofed_silent(r: &ThreatReading) -> bool {
    r.ir == 0.0 && r.rf == 0.0 && r.em == 0.0 && !r.vibration
}

fn is_overload(r: &ThreatReading) -> bool {
    r.ir > OVERLOAD_MIN && r.rf > OVERLOAD_MIN && r.em > OVERLOAD_MIN
}

/// Evaluates every rule against `reading`, in rule order.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidReading`](crate::ScoringError::InvalidReading)
/// if any channel is outside `[0, 1]`.
pub fn detect_anomalies(reading: &ThreatReading) -> Result<Vec<AnomalyFlag>> {
    reading.validate()?;

    let flags: Vec<AnomalyFlag> = RULES
        .iter()
        .filter(|(_, predicate)| predicate(reading))
        .map(|(flag, _)| *flag)
        .collect();

    if !flags.is_empty() {
        debug!(?flags, "anomalies detected");
    }
    Ok(flags)
}
