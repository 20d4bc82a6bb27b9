//! # VASTAV Classifier
//!
//! Maps a threat reading to one of three object labels: `real`, `fake` or
//! `inactive`.
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`Classifier`] | Adapter the scanner calls; wraps any [`Predictor`] |
//! | [`DecisionTree`] | CART model fitted on labelled samples |
//! | [`ModelArtifact`] | On-disk JSON form of a fitted tree |
//! | [`dataset`] | Synthetic training data and its CSV format |
//!
//! ## Lifecycle
//!
//! ```text
//!  generate_dataset ──▶ sensor_training.csv ──▶ DecisionTree::fit
//!                                                     │
//!                                                     ▼
//!                     Classifier::load ◀──── classifier.json
//! ```
//!
//! The adapter is built once and passed to callers explicitly. A missing or
//! unreadable artifact is [`ClassifierError::ModelUnavailable`]; there is no
//! fallback label.
//!
//! ## Usage
//!
//! ```rust
//! use rand::SeedableRng;
//! use vastav_classifier::{dataset, Classifier, DecisionTree, Label, TreeParams};
//! use vastav_sensors::ThreatReading;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(11);
//! let samples = dataset::generate_dataset(200, &mut rng);
//! let tree = DecisionTree::fit(&samples, &TreeParams::default())?;
//!
//! let classifier = Classifier::new(tree);
//! let reading = ThreatReading::new(0.0, 0.0, 0.0, false)?;
//! assert_eq!(classifier.classify(&reading)?, Label::Fake);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod adapter;
mod artifact;
pub mod dataset;
mod error;
mod label;
mod tree;

pub use adapter::{Classifier, Predictor};
pub use artifact::{ModelArtifact, ARTIFACT_FORMAT};
pub use dataset::TrainingSample;
pub use error::ClassifierError;
pub use label::Label;
pub use tree::{DecisionTree, Node, TreeParams};

/// Result type for classifier operations.
pub type Result<T> = std::result::Result<T, ClassifierError>;
