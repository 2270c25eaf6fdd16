//! # detectlab-core
//!
//! **How well do LLM-text detectors spot a rewritten abstract?**
//!
//! `detectlab-core` holds the pieces behind the study's experiment tooling:
//! seeded test-set sampling, threshold sweeps over detector scores, ROC curves
//! and score histograms, plus the glue that reads the abstract database and
//! writes the files experimenters work from.
//!
//! ## Quick Start
//!
//! ```
//! use detectlab_core::{LabeledScore, RateKind, confusion_at, rate_curve};
//!
//! let scores = vec![
//!     LabeledScore::new(0, 0.2).unwrap(),
//!     LabeledScore::new(0, 0.7).unwrap(),
//!     LabeledScore::new(1, 0.3).unwrap(),
//!     LabeledScore::new(1, 0.9).unwrap(),
//! ];
//!
//! let counts = confusion_at(&scores, 0.5);
//! assert_eq!(counts.true_positive_rate(), Some(0.5));
//!
//! let tpr = rate_curve(&scores, RateKind::Tpr, 3);
//! assert_eq!(tpr.points.len(), 3);
//! ```
//!
//! ## Architecture
//!
//! Database → Sampler → export (text / CSV) → detectors → results CSV →
//! Evaluator / ROC / histogram → chart
//!
//! The sampler and the evaluator are pure; all file and database access sits
//! in [`store`], [`export`], [`results`] and [`config`].

pub mod config;
pub mod csv;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod histogram;
pub mod results;
pub mod roc;
pub mod sampler;
pub mod store;

pub use config::{DetectorPanel, ExperimentConfig};
pub use error::{Error, Result};
pub use evaluation::{
    ConfusionCounts, LabeledScore, RateCurve, RateKind, RatePoint, confusion_at,
    false_positive_rate, rate_curve, thresholds, true_positive_rate,
};
pub use export::{PROMPT_PREFIX, write_prompts, write_test_csv, write_test_text};
pub use histogram::{ClassHistogram, class_histogram};
pub use results::{load_results, parse_results};
pub use roc::{RocCurve, RocPoint, roc_curve};
pub use sampler::{DEFAULT_SEED, SampleAssignment, Variant, sample};
pub use store::{AbstractRecord, AbstractStore};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
