//! ROC curve and area under it.
//!
//! Unlike the fixed-resolution sweep in [`crate::evaluation`], the ROC curve is
//! exact: one point per distinct score, calling every abstract scoring at or
//! above that value rewritten.

use serde::{Deserialize, Serialize};

use crate::evaluation::LabeledScore;

/// One operating point. `threshold` is `+inf` for the origin point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub fpr: f64,
    pub tpr: f64,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    pub points: Vec<RocPoint>,
    /// Trapezoidal area under the curve; `None` when either class is missing.
    pub auc: Option<f64>,
}

/// Build the ROC curve for a set of labelled scores.
///
/// Returns an empty curve with no AUC when the input lacks either original or
/// rewritten abstracts, since one of the two rates is then undefined everywhere.
pub fn roc_curve(scores: &[LabeledScore]) -> RocCurve {
    let positives = scores.iter().filter(|s| s.is_rewritten()).count();
    let negatives = scores.len() - positives;
    if positives == 0 || negatives == 0 {
        log::warn!(
            "ROC undefined: {positives} rewritten / {negatives} original abstracts"
        );
        return RocCurve {
            points: Vec::new(),
            auc: None,
        };
    }

    let mut sorted: Vec<&LabeledScore> = scores.iter().collect();
    sorted.sort_by(|a, b| b.score().total_cmp(&a.score()));

    let mut points = vec![RocPoint {
        fpr: 0.0,
        tpr: 0.0,
        threshold: f64::INFINITY,
    }];
    let (mut tp, mut fp) = (0usize, 0usize);
    let mut i = 0;
    while i < sorted.len() {
        let threshold = sorted[i].score();
        // Consume every record tied at this score before emitting a point.
        while i < sorted.len() && sorted[i].score() == threshold {
            if sorted[i].is_rewritten() {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        points.push(RocPoint {
            fpr: fp as f64 / negatives as f64,
            tpr: tp as f64 / positives as f64,
            threshold,
        });
    }

    let auc = Some(trapezoid_area(&points));
    RocCurve { points, auc }
}

fn trapezoid_area(points: &[RocPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| (w[1].fpr - w[0].fpr) * (w[1].tpr + w[0].tpr) / 2.0)
        .sum()
}
