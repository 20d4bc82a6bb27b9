//! Terminal presentation of scan results.

use vastav_core::{ScanRecord, ScanReport};

/// Multi-line operator report for one scan.
pub fn report(report: &ScanReport) -> String {
    let r = &report.record;
    let env = &r.environment;

    let mut lines = vec![format!(
        "== Scan {} ({}) ==",
        r.scan_id,
        r.timestamp.format("%Y-%m-%d %H:%M:%S")
    )];
    if let Some(object) = &r.object {
        lines.push(format!("  Object detected      : {}", object));
    }
    lines.push(format!("  Infrared (IR)        : {:.2}", r.threat.ir));
    lines.push(format!("  Radio Frequency (RF) : {:.2}  [risk: {}]", r.threat.rf, r.rf_risk));
    lines.push(format!("  Electromagnetic (EM) : {:.2}", r.threat.em));
    lines.push(format!(
        "  Vibration            : {}",
        if r.threat.vibration { "Yes" } else { "No" }
    ));
    lines.push(format!(
        "  Classified as        : {}",
        r.classification.as_str().to_uppercase()
    ));

    if r.anomalies.is_empty() {
        lines.push("  Anomalies            : none".to_string());
    }
    for flag in &r.anomalies {
        lines.push(format!("  Anomaly              : {} ({})", flag, flag.description()));
    }

    lines.push(format!(
        "  Environment ({:?})    : heat {:.2}, smoke {:.2}, em {:.2}, radiation {:.2}, sound {:.2}",
        r.environment_profile, env.heat, env.smoke, env.em_radiation, env.radiation, env.sound
    ));
    lines.push(format!(
        "  PARINAAM score       : {}/100 ({})",
        r.impact.score,
        r.impact.level.to_string().to_uppercase()
    ));

    if let Some(err) = &report.log_failure {
        lines.push(format!("  WARNING: result not logged: {}", err));
    }
    lines.join("\n")
}

/// One-line form used by `watch`.
pub fn summary_line(report: &ScanReport) -> String {
    let mut line = record_line(&report.record);
    if report.log_failure.is_some() {
        line.push_str(" [not logged]");
    }
    line
}

fn record_line(record: &ScanRecord) -> String {
    format!(
        "{} THREAT | {}",
        record.classification.as_str().to_uppercase(),
        record
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use vastav_core::{
        AnomalyFlag, EnvironmentProfile, EnvironmentReading, ImpactLevel, ImpactScore, Label,
        LedgerError, RfRisk, ThreatReading,
    };

    fn sample_report(log_failure: Option<LedgerError>) -> ScanReport {
        ScanReport {
            record: ScanRecord {
                scan_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                object: Some("backpack".to_string()),
                threat: ThreatReading::new(0.1, 0.95, 0.7, true).unwrap(),
                environment_profile: EnvironmentProfile::Suppressed,
                environment: EnvironmentReading::uniform(0.1).unwrap(),
                classification: Label::Fake,
                anomalies: vec![AnomalyFlag::Decoy],
                rf_risk: RfRisk::High,
                impact: ImpactScore {
                    score: 10,
                    level: ImpactLevel::Low,
                },
                model: "in-memory".to_string(),
            },
            log_failure,
        }
    }

    #[test]
    fn test_report_contents() {
        let text = report(&sample_report(None));
        assert!(text.contains("Classified as        : FAKE"));
        assert!(text.contains("[risk: high]"));
        assert!(text.contains("decoy"));
        assert!(text.contains("10/100 (LOW)"));
        assert!(text.contains("backpack"));
        assert!(!text.contains("WARNING"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_report_without_anomalies_or_object() {
        let mut scan = sample_report(None);
        scan.record.object = None;
        scan.record.anomalies.clear();

        let text = report(&scan);
        assert!(text.contains("Anomalies            : none"));
        assert!(!text.contains("Object detected"));
    }

    #[test]
    fn test_report_surfaces_log_failure() {
        let failure = LedgerError::LogWriteFailure {
            path: "logs/threat_log.jsonl".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        let text = report(&sample_report(Some(failure)));
        assert!(text.contains("WARNING: result not logged"));
        assert!(text.contains("read-only"));
    }

    #[test]
    fn test_summary_line() {
        let line = summary_line(&sample_report(None));
        assert!(line.starts_with("FAKE THREAT"));
        assert!(!line.contains('\n'));
    }
}
