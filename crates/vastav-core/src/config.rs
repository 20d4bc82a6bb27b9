//! Configuration types for VASTAV.
//!
//! Every section has defaults matching the demo layout (`models/`,
//! `datasets/`, `logs/` under the working directory), so a config file only
//! needs the keys it overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{Result, ScanError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VastavConfig {
    /// Classifier artifact.
    pub model: ModelConfig,

    /// Scan ledger.
    pub ledger: LedgerConfig,

    /// Simulated sensor head.
    pub simulator: SimulatorConfig,

    /// Training data generation and model fitting.
    pub training: TrainingConfig,
}

/// Classifier artifact location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/classifier.json"),
        }
    }
}

/// Scan ledger settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Newline-delimited JSON file, appended to on every scan.
    pub path: PathBuf,

    /// Record scans at all. When false, scans run but nothing is written.
    pub enabled: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("logs/threat_log.jsonl"),
            enabled: true,
        }
    }
}

/// Simulated sensor settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Fixed RNG seed for reproducible runs. Entropy-seeded when absent.
    pub seed: Option<u64>,
}

/// Training data and model fitting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// CSV file with header `IR,RF,EM,Vibration,Label`.
    pub dataset_path: PathBuf,

    /// Rows produced by the generator.
    pub samples: usize,

    /// Generator seed. Entropy-seeded when absent.
    pub seed: Option<u64>,

    /// Maximum tree depth.
    pub max_depth: usize,

    /// Minimum samples a node needs before it may split.
    pub min_samples_split: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("datasets/sensor_training.csv"),
            samples: 100,
            seed: None,
            max_depth: 8,
            min_samples_split: 2,
        }
    }
}

impl VastavConfig {
    /// Reads a YAML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ScanError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| ScanError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` if it exists, otherwise returns defaults.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let config = Self::from_file(path)?;
            info!("Loaded configuration from: {}", path.display());
            Ok(config)
        } else {
            warn!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Writes the config as YAML.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .map_err(|e| ScanError::Config(format!("cannot encode config: {}", e)))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ScanError::Config(format!("cannot create {}: {}", parent.display(), e)))?;
        }
        fs::write(path, content)
            .map_err(|e| ScanError::Config(format!("cannot write {}: {}", path.display(), e)))
    }

    /// Rejects values no run could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.model.path.as_os_str().is_empty() {
            return Err(ScanError::Config("model.path is empty".to_string()));
        }
        if self.ledger.enabled && self.ledger.path.as_os_str().is_empty() {
            return Err(ScanError::Config("ledger.path is empty".to_string()));
        }
        if self.training.samples == 0 {
            return Err(ScanError::Config("training.samples must be positive".to_string()));
        }
        if self.training.min_samples_split < 2 {
            return Err(ScanError::Config(
                "training.min_samples_split must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}
