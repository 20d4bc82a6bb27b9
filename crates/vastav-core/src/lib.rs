//! # VASTAV Core
//!
//! Scan pipeline for suspicious-object assessment. Orchestrates the sensor
//! head, the classifier and the scoring engines, then appends a
//! self-describing record to the scan ledger.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ThreatReading   ┌──────────────┐
//! │ ThreatSensor │──────────────────▶│  Classifier  │──── Label
//! └──────────────┘         │         └──────────────┘       │
//!                          ▼                                │
//!              ┌────────────────────────┐                   ▼
//!              │ anomaly rules, RF tier │       environment profile
//!              └────────────────────────┘      (real ⇒ ambient,
//!                                               fake/inactive ⇒ suppressed)
//!                                                           │
//! ┌───────────────────┐  EnvironmentReading  ┌──────────────▼─┐
//! │ EnvironmentSensor │─────────────────────▶│ Impact scoring │
//! └───────────────────┘                      └───────┬────────┘
//!                                                    ▼
//!                                              ┌───────────┐
//!                                              │ ScanRecord│──▶ ScanLog
//!                                              └───────────┘
//! ```
//!
//! ## Failure Policy
//!
//! | Failure | Effect |
//! |---------|--------|
//! | Model missing or unreadable | `ScanError::Classifier(ModelUnavailable)` at construction |
//! | Reading outside `[0, 1]` | scan fails with an invalid-reading error |
//! | Ledger append fails | scan succeeds; failure carried in [`ScanReport::log_failure`] and logged at `warn` |
//! | Ledger file cannot be opened | `ScanError::Ledger` from [`open_ledger`] |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vastav_core::{open_ledger, Scanner, VastavConfig};
//! use vastav_classifier::Classifier;
//! use vastav_sensors::UniformSimulator;
//!
//! let config = VastavConfig::default();
//! let classifier = Classifier::load(&config.model.path)?;
//! let ledger = open_ledger(&config.ledger)?;
//!
//! let mut scanner = Scanner::new(UniformSimulator::new(), classifier, ledger);
//! let report = scanner.scan()?;
//! println!("{} (impact {})", report.record.classification, report.record.impact.score);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod error;
mod ledger;
mod record;
mod scanner;

pub use config::{LedgerConfig, ModelConfig, SimulatorConfig, TrainingConfig, VastavConfig};
pub use error::{LedgerError, ScanError};
pub use ledger::{open_ledger, DisabledLedger, JsonlLedger, MemoryLedger, ScanLog};
pub use record::ScanRecord;
pub use scanner::{environment_profile_for, ScanReport, Scanner, SensorHead};

// Re-export component types for convenience
pub use vastav_classifier::{Classifier, Label};
pub use vastav_scoring::{AnomalyFlag, ImpactLevel, ImpactScore, RfRisk};
pub use vastav_sensors::{
    EnvironmentProfile, EnvironmentReading, EnvironmentSensor, ThreatReading, ThreatSensor,
    UniformSimulator,
};

/// Core result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
