//! # Scan Ledger
//!
//! Append-only record of every scan, one JSON object per line.
//!
//! ## Guarantees
//!
//! - Records are only ever appended; existing lines are never rewritten.
//! - Each append encodes the full line first and writes it with a single
//!   `write_all` under a mutex, so concurrent appends through one ledger
//!   never interleave.
//! - The file is flushed after every append.
//!
//! The scanner depends only on [`ScanLog::append`]. [`JsonlLedger::read_all`]
//! exists for replay tooling and tests. [`open_ledger`] picks the ledger a
//! [`LedgerConfig`] asks for; with `enabled: false` scans are not recorded.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::{LedgerConfig, LedgerError, Result, ScanRecord};

/// Destination for scan records.
pub trait ScanLog: Send + Sync {
    /// Persists one record.
    fn append(&self, record: &ScanRecord) -> std::result::Result<(), LedgerError>;
}

impl<T: ScanLog + ?Sized> ScanLog for Arc<T> {
    fn append(&self, record: &ScanRecord) -> std::result::Result<(), LedgerError> {
        (**self).append(record)
    }
}

impl<T: ScanLog + ?Sized> ScanLog for Box<T> {
    fn append(&self, record: &ScanRecord) -> std::result::Result<(), LedgerError> {
        (**self).append(record)
    }
}

/// Opens the ledger described by `config`.
///
/// # Errors
///
/// Returns [`ScanError::Ledger`](crate::ScanError::Ledger) if an enabled
/// ledger file cannot be created or opened.
pub fn open_ledger(config: &LedgerConfig) -> Result<Box<dyn ScanLog>> {
    if !config.enabled {
        debug!("scan ledger disabled");
        return Ok(Box::new(DisabledLedger));
    }
    Ok(Box::new(JsonlLedger::open(&config.path)?))
}

/// Newline-delimited JSON file ledger.
#[derive(Debug)]
pub struct JsonlLedger {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonlLedger {
    /// Opens `path` for appending, creating it and its parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source| LedgerError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;

        debug!(path = %path.display(), "ledger opened");
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replays every record in the file at `path`.
    ///
    /// A missing file is an empty ledger. Blank lines are skipped.
    pub fn read_all<P: AsRef<Path>>(path: P) -> std::result::Result<Vec<ScanRecord>, LedgerError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(LedgerError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| LedgerError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record = ScanRecord::from_json_line(&line).map_err(|e| LedgerError::Corrupt {
                line: index + 1,
                reason: e.to_string(),
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

impl ScanLog for JsonlLedger {
    fn append(&self, record: &ScanRecord) -> std::result::Result<(), LedgerError> {
        let mut line = record.to_json_line()?;
        line.push('\n');

        let mut file = self.file.lock().map_err(|_| LedgerError::Poisoned)?;
        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| LedgerError::LogWriteFailure {
                path: self.path.clone(),
                source,
            })?;

        debug!(scan_id = %record.scan_id, "scan record appended");
        Ok(())
    }
}

/// In-process ledger, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    records: Mutex<Vec<ScanRecord>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every appended record, oldest first.
    pub fn records(&self) -> Vec<ScanRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl ScanLog for MemoryLedger {
    fn append(&self, record: &ScanRecord) -> std::result::Result<(), LedgerError> {
        self.records
            .lock()
            .map_err(|_| LedgerError::Poisoned)?
            .push(record.clone());
        Ok(())
    }
}

/// Ledger that accepts and drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLedger;

impl ScanLog for DisabledLedger {
    fn append(&self, _record: &ScanRecord) -> std::result::Result<(), LedgerError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;
    use vastav_classifier::Label;
    use vastav_scoring::{ImpactLevel, ImpactScore, RfRisk};
    use vastav_sensors::{EnvironmentProfile, EnvironmentReading, ThreatReading};

    fn record(label: Label) -> ScanRecord {
        ScanRecord {
            scan_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            object: None,
            threat: ThreatReading::new(0.37, 0.52, 0.18, false).unwrap(),
            environment_profile: EnvironmentProfile::Suppressed,
            environment: EnvironmentReading::new(0.03, 0.11, 0.2, 0.0, 0.19).unwrap(),
            classification: label,
            anomalies: Vec::new(),
            rf_risk: RfRisk::Medium,
            impact: ImpactScore {
                score: 10,
                level: ImpactLevel::Low,
            },
            model: "test".to_string(),
        }
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/threat_log.jsonl");
        let ledger = JsonlLedger::open(&path).unwrap();

        let first = record(Label::Fake);
        let second = record(Label::Inactive);
        ledger.append(&first).unwrap();
        ledger.append(&second).unwrap();

        let records = JsonlLedger::read_all(&path).unwrap();
        assert_eq!(records, vec![first, second]);
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("threat_log.jsonl");

        let first = record(Label::Real);
        JsonlLedger::open(&path).unwrap().append(&first).unwrap();

        let second = record(Label::Fake);
        JsonlLedger::open(&path).unwrap().append(&second).unwrap();

        let records = JsonlLedger::read_all(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], first);
    }

    #[test]
    fn test_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("threat_log.jsonl");
        let ledger = JsonlLedger::open(&path).unwrap();
        for _ in 0..3 {
            ledger.append(&record(Label::Real)).unwrap();
        }
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_read_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlLedger::read_all(dir.path().join("none.jsonl")).unwrap().is_empty());
    }

    #[test]
    fn test_read_reports_corrupt_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("threat_log.jsonl");
        let good = record(Label::Real).to_json_line().unwrap();
        fs::write(&path, format!("{}\n{{\"truncated\": \n", good)).unwrap();

        let err = JsonlLedger::read_all(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Corrupt { line: 2, .. }));
    }

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("threat_log.jsonl");
        let ledger = Arc::new(JsonlLedger::open(&path).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        ledger.append(&record(Label::Inactive)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let records = JsonlLedger::read_all(&path).unwrap();
        assert_eq!(records.len(), 200);
    }

    #[test]
    fn test_open_ledger_enabled_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LedgerConfig {
            path: dir.path().join("logs/threat_log.jsonl"),
            enabled: true,
        };

        let ledger = open_ledger(&config).unwrap();
        ledger.append(&record(Label::Real)).unwrap();

        assert_eq!(JsonlLedger::read_all(&config.path).unwrap().len(), 1);
    }

    #[test]
    fn test_open_ledger_disabled_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = LedgerConfig {
            path: dir.path().join("logs/threat_log.jsonl"),
            enabled: false,
        };

        let ledger = open_ledger(&config).unwrap();
        ledger.append(&record(Label::Real)).unwrap();

        assert!(!config.path.exists());
        assert!(!dir.path().join("logs").exists());
    }

    #[test]
    fn test_open_ledger_reports_unopenable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("logs");
        fs::write(&blocker, "not a directory").unwrap();
        let config = LedgerConfig {
            path: blocker.join("threat_log.jsonl"),
            enabled: true,
        };

        match open_ledger(&config) {
            Err(crate::ScanError::Ledger(LedgerError::Io { path, .. })) => {
                assert_eq!(path, config.path);
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("ledger opened under a regular file"),
        }
    }

    #[test]
    fn test_memory_ledger() {
        let ledger = MemoryLedger::new();
        ledger.append(&record(Label::Fake)).unwrap();
        assert_eq!(ledger.records().len(), 1);
        assert_eq!(ledger.records()[0].classification, Label::Fake);
    }
}
