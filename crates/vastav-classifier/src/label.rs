//! Classification labels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of classifying a scanned object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Live device with genuine signatures.
    Real,
    /// Replica or decoy.
    Fake,
    /// Genuine but dormant device.
    Inactive,
}

impl Label {
    /// Every label, in index order.
    pub const ALL: [Label; 3] = [Label::Real, Label::Fake, Label::Inactive];

    /// Stable index used for per-label counters.
    pub fn index(self) -> usize {
        match self {
            Self::Real => 0,
            Self::Fake => 1,
            Self::Inactive => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Fake => "fake",
            Self::Inactive => "inactive",
        }
    }

    /// Whether the object can produce genuine environmental impact.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Real)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "real" => Ok(Self::Real),
            "fake" => Ok(Self::Fake),
            "inactive" => Ok(Self::Inactive),
            other => Err(format!("unknown label '{}'", other)),
        }
    }
}
