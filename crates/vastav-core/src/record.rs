//! The durable scan record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vastav_classifier::Label;
use vastav_scoring::{AnomalyFlag, ImpactScore, RfRisk};
use vastav_sensors::{EnvironmentProfile, EnvironmentReading, ThreatReading};

/// Everything known about one scan.
///
/// Serialized as a single JSON object per ledger line. Each record carries
/// its own id and timestamp so lines can be replayed independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub scan_id: Uuid,
    pub timestamp: DateTime<Utc>,

    /// Label of the upstream detection that triggered the scan, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    pub threat: ThreatReading,

    /// Range the environment was sampled from.
    pub environment_profile: EnvironmentProfile,
    pub environment: EnvironmentReading,

    pub classification: Label,
    pub anomalies: Vec<AnomalyFlag>,
    pub rf_risk: RfRisk,
    pub impact: ImpactScore,

    /// Identifier of the classifier model.
    pub model: String,
}

impl ScanRecord {
    /// Encodes the record as one ledger line, without the trailing newline.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decodes one ledger line.
    pub fn from_json_line(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    /// Whether any anomaly rule fired.
    pub fn is_anomalous(&self) -> bool {
        !self.anomalies.is_empty()
    }
}

impl std::fmt::Display for ScanRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} rf_risk={} impact={} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.classification,
            self.rf_risk,
            self.impact.score,
            self.impact.level
        )?;
        if let Some(object) = &self.object {
            write!(f, " object={}", object)?;
        }
        if self.is_anomalous() {
            let flags: Vec<&str> = self.anomalies.iter().map(|a| a.as_str()).collect();
            write!(f, " anomalies=[{}]", flags.join(","))?;
        }
        Ok(())
    }
}
