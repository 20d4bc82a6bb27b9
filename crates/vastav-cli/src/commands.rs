//! Subcommand implementations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use vastav_classifier::{dataset, DecisionTree, ModelArtifact, TreeParams};
use vastav_core::{
    open_ledger, Classifier, JsonlLedger, Label, ScanRecord, Scanner, ThreatReading,
    UniformSimulator, VastavConfig,
};

use crate::render;

fn load_config(path: &Path) -> Result<VastavConfig> {
    VastavConfig::load_or_default(path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))
}

fn build_scanner(config: &VastavConfig) -> Result<Scanner> {
    let classifier = Classifier::load(&config.model.path).with_context(|| {
        format!(
            "No usable model at {} (run `vastav generate-data` then `vastav train`)",
            config.model.path.display()
        )
    })?;

    let sensors = match config.simulator.seed {
        Some(seed) => UniformSimulator::with_seed(seed),
        None => UniformSimulator::new(),
    };

    let ledger = open_ledger(&config.ledger)
        .with_context(|| format!("Failed to open scan log: {}", config.ledger.path.display()))?;
    if !config.ledger.enabled {
        warn!("Scan log disabled; results will not be recorded");
    }

    Ok(Scanner::new(sensors, classifier, ledger))
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn scan(config_path: &Path, count: usize, object: Option<&str>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let mut scanner = build_scanner(&config)?;

    for _ in 0..count {
        let report = scanner.scan_object(object)?;
        if json {
            println!("{}", report.record.to_json_line()?);
        } else {
            println!("{}", render::report(&report));
        }
    }
    Ok(())
}

pub async fn watch(
    config_path: &Path,
    interval_ms: u64,
    limit: Option<usize>,
    object: Option<&str>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let mut scanner = build_scanner(&config)?;

    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    let mut completed = 0usize;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!("VASTAV is running... press Ctrl-C to stop");
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = scanner.scan_object(object)?;
                println!("{}", render::summary_line(&report));
                completed += 1;
                if limit.is_some_and(|limit| completed >= limit) {
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("Interrupted");
                break;
            }
        }
    }

    info!(scans = completed, "Watch stopped");
    Ok(())
}

pub fn generate_data(config_path: &Path, samples: Option<usize>, out: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let count = samples.unwrap_or(config.training.samples);
    if count == 0 {
        bail!("Sample count must be positive");
    }
    let out = out.unwrap_or_else(|| config.training.dataset_path.clone());

    let mut rng = rng_for(config.training.seed);
    let rows = dataset::generate_dataset(count, &mut rng);
    dataset::save(&out, &rows)
        .with_context(|| format!("Failed to write training data: {}", out.display()))?;

    println!("Sensor training data generated: {} rows -> {}", rows.len(), out.display());
    for label in Label::ALL {
        let n = rows.iter().filter(|r| r.label == label).count();
        println!("  {:<9} {}", label, n);
    }
    Ok(())
}

pub fn train(config_path: &Path, data: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let data = data.unwrap_or_else(|| config.training.dataset_path.clone());
    let out = out.unwrap_or_else(|| config.model.path.clone());

    let samples = dataset::load(&data)
        .with_context(|| format!("Failed to read training data: {}", data.display()))?;
    let params = TreeParams {
        max_depth: config.training.max_depth,
        min_samples_split: config.training.min_samples_split,
    };
    let tree = DecisionTree::fit(&samples, &params)?;
    let accuracy = tree.accuracy(&samples);

    ModelArtifact::new(tree.clone(), samples.len())
        .save(&out)
        .with_context(|| format!("Failed to save model: {}", out.display()))?;

    println!(
        "Model trained on {} samples (depth {}, {} leaves, training accuracy {:.1}%) and saved to {}",
        samples.len(),
        tree.depth(),
        tree.leaf_count(),
        accuracy * 100.0,
        out.display()
    );

    let sample = ThreatReading::new(0.8, 0.6, 0.7, true)?;
    let prediction = Classifier::new(tree).classify(&sample)?;
    println!("Prediction for sample [0.8, 0.6, 0.7, 1]: {}", prediction);
    Ok(())
}

pub fn history(config_path: &Path, tail: usize) -> Result<()> {
    let config = load_config(config_path)?;
    let records = JsonlLedger::read_all(&config.ledger.path)
        .with_context(|| format!("Failed to read scan log: {}", config.ledger.path.display()))?;

    if records.is_empty() {
        println!("No scans recorded in {}", config.ledger.path.display());
        return Ok(());
    }

    let shown = last_records(&records, tail);
    for record in shown {
        println!("{}", record);
    }
    println!("({} of {} records)", shown.len(), records.len());
    Ok(())
}

/// The newest `tail` records, oldest first.
fn last_records(records: &[ScanRecord], tail: usize) -> &[ScanRecord] {
    &records[records.len().saturating_sub(tail)..]
}

pub fn check(config_path: &Path) -> Result<()> {
    let config = VastavConfig::from_file(config_path)
        .with_context(|| format!("Invalid configuration: {}", config_path.display()))?;
    println!("Configuration OK: {}", config_path.display());

    match Classifier::load(&config.model.path) {
        Ok(classifier) => println!("Model OK: {} ({})", config.model.path.display(), classifier.model_id()),
        Err(e) => warn!("Model not ready: {}", e),
    }
    Ok(())
}

pub fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    VastavConfig::default().to_file(config_path)?;
    println!("Default configuration written to {}", config_path.display());
    Ok(())
}
