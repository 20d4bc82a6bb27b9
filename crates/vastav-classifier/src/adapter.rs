//! Classifier adapter.

use std::path::Path;

use tracing::{debug, info};
use vastav_sensors::ThreatReading;

use crate::{Label, ModelArtifact, Result};

/// Model identifier used when a predictor is injected without an artifact.
const IN_MEMORY_MODEL: &str = "in-memory";

/// Anything that maps a feature vector to a label.
///
/// Features are `[ir, rf, em, vibration]` with vibration as 1.0 / 0.0.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &[f64; 4]) -> Label;
}

/// Stateless classification entry point.
///
/// Built once at startup and handed to whoever scans. `classify` is
/// deterministic for a given model and has no side effects.
pub struct Classifier {
    model: Box<dyn Predictor>,
    model_id: String,
}

impl Classifier {
    /// Wraps an already constructed model.
    pub fn new<P: Predictor + 'static>(model: P) -> Self {
        Self {
            model: Box::new(model),
            model_id: IN_MEMORY_MODEL.to_string(),
        }
    }

    /// Sets the identifier recorded with each scan.
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Loads a model artifact from disk.
    ///
    /// # Errors
    ///
    /// [`ClassifierError::ModelUnavailable`](crate::ClassifierError::ModelUnavailable)
    /// if the artifact is missing or unusable.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (artifact, fingerprint) = ModelArtifact::load(&path)?;
        info!(
            path = %path.as_ref().display(),
            fingerprint = %fingerprint,
            trained_samples = artifact.trained_samples,
            "classifier loaded"
        );
        Ok(Self::new(artifact.tree).with_model_id(fingerprint))
    }

    /// Identifier of the wrapped model (artifact fingerprint when loaded from disk).
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Labels `reading`.
    ///
    /// # Errors
    ///
    /// Rejects readings outside their declared domain.
    pub fn classify(&self, reading: &ThreatReading) -> Result<Label> {
        reading.validate()?;
        let label = self.model.predict(&reading.features());
        debug!(?reading, %label, "classified");
        Ok(label)
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("model_id", &self.model_id)
            .finish_non_exhaustive()
    }
}
