//! The scan orchestrator.
//!
//! [`Scanner`] runs one complete scan cycle per call: acquire, classify,
//! flag, score, record. Cycles share no state beyond the injected
//! components, so each scan is independent of the ones before it.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use vastav_classifier::{Classifier, Label};
use vastav_scoring::{compute_impact, detect_anomalies, rf_risk_tier};
use vastav_sensors::{EnvironmentProfile, EnvironmentSensor, ThreatSensor};

use crate::{LedgerError, Result, ScanLog, ScanRecord};

/// A sensor head providing both threat and environment channels.
pub trait SensorHead: ThreatSensor + EnvironmentSensor + Send {}

impl<T: ThreatSensor + EnvironmentSensor + Send> SensorHead for T {}

/// Environment range to sample for a classification.
///
/// Only a real object can produce genuine environmental impact; fake and
/// inactive objects are scored against a suppressed environment.
pub fn environment_profile_for(label: Label) -> EnvironmentProfile {
    if label.is_live() {
        EnvironmentProfile::Ambient
    } else {
        EnvironmentProfile::Suppressed
    }
}

/// Outcome of one scan cycle.
#[derive(Debug)]
pub struct ScanReport {
    /// The full record, whether or not it reached the ledger.
    pub record: ScanRecord,

    /// Set when the ledger rejected the record. The scan itself still stands.
    pub log_failure: Option<LedgerError>,
}

impl ScanReport {
    /// Returns true if the record reached the ledger.
    pub fn is_persisted(&self) -> bool {
        self.log_failure.is_none()
    }
}

/// Runs scan cycles against an injected sensor head, classifier and ledger.
///
/// # Example
///
/// ```rust
/// use vastav_core::{MemoryLedger, Scanner};
/// use vastav_classifier::{Classifier, DecisionTree, Label, Node};
/// use vastav_sensors::UniformSimulator;
///
/// let tree = DecisionTree::from_root(Node::Leaf { label: Label::Fake, samples: 1 });
/// let mut scanner = Scanner::new(
///     UniformSimulator::with_seed(1),
///     Classifier::new(tree),
///     MemoryLedger::new(),
/// );
///
/// let report = scanner.scan()?;
/// assert!(report.record.impact.score <= 20);
/// # Ok::<(), vastav_core::ScanError>(())
/// ```
pub struct Scanner {
    sensors: Box<dyn SensorHead>,
    classifier: Classifier,
    ledger: Box<dyn ScanLog>,
}

impl Scanner {
    pub fn new<S, L>(sensors: S, classifier: Classifier, ledger: L) -> Self
    where
        S: SensorHead + 'static,
        L: ScanLog + 'static,
    {
        Self {
            sensors: Box::new(sensors),
            classifier,
            ledger: Box::new(ledger),
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Runs one scan cycle with no upstream detection attached.
    pub fn scan(&mut self) -> Result<ScanReport> {
        self.scan_object(None)
    }

    /// Runs one scan cycle for an object reported by an upstream detector.
    ///
    /// # Errors
    ///
    /// Sensor, classifier and scoring failures abort the scan. A ledger
    /// failure does not; it is returned in [`ScanReport::log_failure`].
    pub fn scan_object(&mut self, object: Option<&str>) -> Result<ScanReport> {
        let threat = self.sensors.read_threat()?;

        let classification = self.classifier.classify(&threat)?;
        let anomalies = detect_anomalies(&threat)?;
        let rf_risk = rf_risk_tier(threat.rf)?;

        let profile = environment_profile_for(classification);
        let environment = self.sensors.read_environment(profile)?;
        profile.check(&environment)?;
        let impact = compute_impact(&environment)?;

        let record = ScanRecord {
            scan_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            object: object.map(str::to_string),
            threat,
            environment_profile: profile,
            environment,
            classification,
            anomalies,
            rf_risk,
            impact,
            model: self.classifier.model_id().to_string(),
        };

        info!(
            scan_id = %record.scan_id,
            classification = %record.classification,
            rf_risk = %record.rf_risk,
            impact = record.impact.score,
            anomalies = record.anomalies.len(),
            "scan complete"
        );

        let log_failure = match self.ledger.append(&record) {
            Ok(()) => None,
            Err(e) => {
                warn!(scan_id = %record.scan_id, error = %e, "scan record not persisted");
                Some(e)
            }
        };

        Ok(ScanReport {
            record,
            log_failure,
        })
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryLedger;
    use std::sync::Arc;
    use vastav_classifier::{DecisionTree, Node, Predictor};
    use vastav_scoring::{AnomalyFlag, ImpactLevel, RfRisk};
    use vastav_sensors::{EnvironmentReading, SensorError, ThreatReading};

    /// Returns fixed readings; ignores the requested profile.
    struct Fixed {
        threat: ThreatReading,
        environment: EnvironmentReading,
    }

    impl Fixed {
        fn new(threat: ThreatReading, environment: EnvironmentReading) -> Self {
            Self {
                threat,
                environment,
            }
        }
    }

    impl ThreatSensor for Fixed {
        fn read_threat(&mut self) -> vastav_sensors::Result<ThreatReading> {
            Ok(self.threat)
        }
    }

    impl EnvironmentSensor for Fixed {
        fn read_environment(
            &mut self,
            _profile: EnvironmentProfile,
        ) -> vastav_sensors::Result<EnvironmentReading> {
            Ok(self.environment)
        }
    }

    struct Always(Label);

    impl Predictor for Always {
        fn predict(&self, _features: &[f64; 4]) -> Label {
            self.0
        }
    }

    struct BrokenLedger;

    impl ScanLog for BrokenLedger {
        fn append(&self, _record: &ScanRecord) -> std::result::Result<(), LedgerError> {
            Err(LedgerError::LogWriteFailure {
                path: "/dev/full".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "no space left"),
            })
        }
    }

    struct FailingSensor;

    impl ThreatSensor for FailingSensor {
        fn read_threat(&mut self) -> vastav_sensors::Result<ThreatReading> {
            Err(SensorError::Acquisition("sensor head offline".to_string()))
        }
    }

    impl EnvironmentSensor for FailingSensor {
        fn read_environment(
            &mut self,
            _profile: EnvironmentProfile,
        ) -> vastav_sensors::Result<EnvironmentReading> {
            Err(SensorError::Acquisition("sensor head offline".to_string()))
        }
    }

    fn threat(ir: f64, rf: f64, em: f64, vibration: bool) -> ThreatReading {
        ThreatReading::new(ir, rf, em, vibration).unwrap()
    }

    #[test]
    fn test_profile_for_labels() {
        assert_eq!(environment_profile_for(Label::Real), EnvironmentProfile::Ambient);
        assert_eq!(environment_profile_for(Label::Fake), EnvironmentProfile::Suppressed);
        assert_eq!(environment_profile_for(Label::Inactive), EnvironmentProfile::Suppressed);
    }

    #[test]
    fn test_real_scan_full_record() {
        let ledger = Arc::new(MemoryLedger::new());
        let sensors = Fixed::new(
            threat(0.95, 0.95, 0.95, true),
            EnvironmentReading::uniform(1.0).unwrap(),
        );
        let mut scanner = Scanner::new(sensors, Classifier::new(Always(Label::Real)), Arc::clone(&ledger));

        let report = scanner.scan().unwrap();
        let record = &report.record;
        assert!(report.is_persisted());
        assert_eq!(record.classification, Label::Real);
        assert_eq!(record.anomalies, vec![AnomalyFlag::Overload]);
        assert_eq!(record.rf_risk, RfRisk::High);
        assert_eq!(record.environment_profile, EnvironmentProfile::Ambient);
        assert_eq!(record.impact.score, 100);
        assert_eq!(record.impact.level, ImpactLevel::High);
        assert_eq!(record.model, "in-memory");

        assert_eq!(ledger.records(), vec![record.clone()]);
    }

    #[test]
    fn test_disabled_ledger_still_scans() {
        let config = crate::LedgerConfig {
            enabled: false,
            ..Default::default()
        };
        let sensors = Fixed::new(
            threat(0.0, 0.0, 0.0, false),
            EnvironmentReading::uniform(0.1).unwrap(),
        );
        let ledger = crate::open_ledger(&config).unwrap();
        let mut scanner = Scanner::new(sensors, Classifier::new(Always(Label::Fake)), ledger);

        let report = scanner.scan().unwrap();
        assert!(report.is_persisted());
        assert_eq!(report.record.impact.score, 10);
        assert!(!config.path.exists());
    }

    #[test]
    fn test_fake_requests_suppressed_environment() {
        let sensors = Fixed::new(
            threat(0.0, 0.0, 0.0, false),
            EnvironmentReading::uniform(0.1).unwrap(),
        );
        let mut scanner = Scanner::new(sensors, Classifier::new(Always(Label::Fake)), MemoryLedger::new());

        let record = scanner.scan().unwrap().record;
        assert_eq!(record.environment_profile, EnvironmentProfile::Suppressed);
        assert_eq!(record.anomalies, vec![AnomalyFlag::SpoofedSilent]);
        assert!(record.impact.score <= 20);
    }

    #[test]
    fn test_suppressed_profile_is_enforced() {
        // A sensor head that ignores the requested profile must not leak a
        // loud environment into a fake object's score.
        let sensors = Fixed::new(
            threat(0.2, 0.1, 0.3, false),
            EnvironmentReading::uniform(0.9).unwrap(),
        );
        let mut scanner = Scanner::new(sensors, Classifier::new(Always(Label::Inactive)), MemoryLedger::new());

        let err = scanner.scan().unwrap_err();
        assert!(matches!(err, crate::ScanError::Sensor(SensorError::InvalidReading { .. })));
    }

    #[test]
    fn test_ledger_failure_is_not_fatal() {
        let sensors = Fixed::new(
            threat(0.7, 0.5, 0.6, true),
            EnvironmentReading::uniform(0.5).unwrap(),
        );
        let mut scanner = Scanner::new(sensors, Classifier::new(Always(Label::Real)), BrokenLedger);

        let report = scanner.scan().unwrap();
        assert!(!report.is_persisted());
        assert!(matches!(report.log_failure, Some(LedgerError::LogWriteFailure { .. })));
        assert_eq!(report.record.classification, Label::Real);
        assert_eq!(report.record.impact.score, 50);
    }

    #[test]
    fn test_sensor_failure_propagates() {
        let mut scanner = Scanner::new(FailingSensor, Classifier::new(Always(Label::Real)), MemoryLedger::new());
        assert!(matches!(scanner.scan(), Err(crate::ScanError::Sensor(_))));
    }

    #[test]
    fn test_object_label_recorded() {
        let sensors = Fixed::new(
            threat(0.1, 0.95, 0.95, true),
            EnvironmentReading::uniform(0.0).unwrap(),
        );
        let tree = DecisionTree::from_root(Node::Leaf {
            label: Label::Fake,
            samples: 1,
        });
        let mut scanner = Scanner::new(sensors, Classifier::new(tree), MemoryLedger::new());

        let record = scanner.scan_object(Some("suitcase")).unwrap().record;
        assert_eq!(record.object.as_deref(), Some("suitcase"));
        assert_eq!(record.anomalies, vec![AnomalyFlag::Decoy]);
    }

    #[test]
    fn test_scans_get_distinct_ids() {
        let sensors = Fixed::new(
            threat(0.5, 0.5, 0.5, true),
            EnvironmentReading::uniform(0.5).unwrap(),
        );
        let mut scanner = Scanner::new(sensors, Classifier::new(Always(Label::Real)), MemoryLedger::new());
        let a = scanner.scan().unwrap().record;
        let b = scanner.scan().unwrap().record;
        assert_ne!(a.scan_id, b.scan_id);
    }
}
