//! Threshold evaluation of detector scores.
//!
//! A detector reports a score in `[0, 1]`; a decision threshold turns it into
//! a verdict. Scores strictly above the threshold are called rewritten
//! (positive), scores at or below it original (negative). Sweeping the
//! threshold across `[0, 1]` gives the TPR/FPR-vs-threshold curves.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Ground-truth label and detector score for one tested abstract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLabeledScore")]
pub struct LabeledScore {
    label: u8,
    score: f64,
}

/// Unchecked wire form; deserialization goes through [`LabeledScore::new`].
#[derive(Deserialize)]
struct RawLabeledScore {
    label: u8,
    score: f64,
}

impl TryFrom<RawLabeledScore> for LabeledScore {
    type Error = Error;

    fn try_from(raw: RawLabeledScore) -> Result<Self> {
        Self::new(raw.label, raw.score)
    }
}

impl LabeledScore {
    /// Build a labelled score. `label` must be 0 (original) or 1 (rewritten)
    /// and `score` must lie in `[0, 1]`.
    pub fn new(label: u8, score: f64) -> Result<Self> {
        if label > 1 {
            return Err(Error::invalid(format!("label must be 0 or 1, got {label}")));
        }
        if !(0.0..=1.0).contains(&score) {
            return Err(Error::invalid(format!(
                "score must be within [0, 1], got {score}"
            )));
        }
        Ok(Self { label, score })
    }

    pub fn label(&self) -> u8 {
        self.label
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// True when the abstract really was rewritten.
    pub fn is_rewritten(&self) -> bool {
        self.label == 1
    }
}

/// Confusion-matrix counts at one threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
}

impl ConfusionCounts {
    /// Record one verdict against its ground truth.
    pub fn record(&mut self, actual_rewritten: bool, predicted_rewritten: bool) {
        match (actual_rewritten, predicted_rewritten) {
            (true, true) => self.tp += 1,
            (false, true) => self.fp += 1,
            (false, false) => self.tn += 1,
            (true, false) => self.fn_ += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    pub fn actual_positive(&self) -> usize {
        self.tp + self.fn_
    }

    pub fn actual_negative(&self) -> usize {
        self.fp + self.tn
    }

    pub fn true_positive_rate(&self) -> Option<f64> {
        true_positive_rate(self)
    }

    pub fn false_positive_rate(&self) -> Option<f64> {
        false_positive_rate(self)
    }
}

/// Which rate a curve tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateKind {
    Tpr,
    Fpr,
}

impl RateKind {
    /// Human-readable series name.
    pub fn label(self) -> &'static str {
        match self {
            RateKind::Tpr => "True Positive Rate",
            RateKind::Fpr => "False Positive Rate",
        }
    }

    /// Evaluate this rate on a set of counts.
    pub fn rate(self, counts: &ConfusionCounts) -> Option<f64> {
        match self {
            RateKind::Tpr => true_positive_rate(counts),
            RateKind::Fpr => false_positive_rate(counts),
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateKind::Tpr => f.write_str("tpr"),
            RateKind::Fpr => f.write_str("fpr"),
        }
    }
}

/// Rate at a single threshold. `rate` is `None` where the rate is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub threshold: f64,
    pub rate: Option<f64>,
}

/// A rate swept over ascending thresholds in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCurve {
    pub kind: RateKind,
    pub points: Vec<RatePoint>,
}

impl RateCurve {
    /// Points where the rate is defined, as `(threshold, rate)` pairs.
    pub fn defined_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.rate.map(|r| (p.threshold, r)))
            .collect()
    }

    /// Number of thresholds where the rate is undefined.
    pub fn holes(&self) -> usize {
        self.points.iter().filter(|p| p.rate.is_none()).count()
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Count verdicts at `threshold`. A score equal to the threshold is negative.
pub fn confusion_at(scores: &[LabeledScore], threshold: f64) -> ConfusionCounts {
    let mut counts = ConfusionCounts::default();
    for s in scores {
        counts.record(s.is_rewritten(), s.score > threshold);
    }
    counts
}

/// `tp / (tp + fn)`, or `None` when there are no rewritten abstracts.
pub fn true_positive_rate(counts: &ConfusionCounts) -> Option<f64> {
    ratio(counts.tp, counts.actual_positive())
}

/// `fp / (fp + tn)`, or `None` when there are no original abstracts.
pub fn false_positive_rate(counts: &ConfusionCounts) -> Option<f64> {
    ratio(counts.fp, counts.actual_negative())
}

/// `resolution` evenly spaced thresholds over `[0, 1]`, both ends included.
pub fn thresholds(resolution: usize) -> Vec<f64> {
    match resolution {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = 1.0 / (n - 1) as f64;
            // Pin the last point so rounding never leaves it short of 1.0.
            (0..n)
                .map(|i| if i == n - 1 { 1.0 } else { i as f64 * step })
                .collect()
        }
    }
}

/// Sweep `kind` over `resolution` thresholds.
pub fn rate_curve(scores: &[LabeledScore], kind: RateKind, resolution: usize) -> RateCurve {
    let points = thresholds(resolution)
        .into_iter()
        .map(|threshold| RatePoint {
            threshold,
            rate: kind.rate(&confusion_at(scores, threshold)),
        })
        .collect();
    RateCurve { kind, points }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
