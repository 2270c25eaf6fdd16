//! Score histograms split by ground truth.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::evaluation::LabeledScore;

/// Fixed-width histograms over `[0, 1]` for original and rewritten abstracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassHistogram {
    /// `bins + 1` ascending edges from 0.0 to 1.0.
    pub edges: Vec<f64>,
    pub original: Vec<u64>,
    pub rewritten: Vec<u64>,
}

impl ClassHistogram {
    pub fn bins(&self) -> usize {
        self.original.len()
    }

    /// Largest single-bin count across both classes.
    pub fn max_count(&self) -> u64 {
        self.original
            .iter()
            .chain(&self.rewritten)
            .copied()
            .max()
            .unwrap_or(0)
    }
}

/// Bin every score into `bins` equal-width bins. The last bin is closed, so a
/// score of exactly 1.0 is counted.
pub fn class_histogram(scores: &[LabeledScore], bins: usize) -> Result<ClassHistogram> {
    if bins == 0 {
        return Err(Error::invalid("histogram needs at least one bin"));
    }

    let width = 1.0 / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { 1.0 } else { i as f64 * width })
        .collect();

    let mut original = vec![0u64; bins];
    let mut rewritten = vec![0u64; bins];
    for s in scores {
        let bin = bin_index(&edges, s.score());
        if s.is_rewritten() {
            rewritten[bin] += 1;
        } else {
            original[bin] += 1;
        }
    }

    Ok(ClassHistogram {
        edges,
        original,
        rewritten,
    })
}

/// Bin holding `score`. The division guess is corrected against `edges` so a
/// score always satisfies `edges[bin] <= score < edges[bin + 1]`, except in the
/// closed last bin.
fn bin_index(edges: &[f64], score: f64) -> usize {
    let bins = edges.len() - 1;
    let mut bin = ((score * bins as f64) as usize).min(bins - 1);
    if bin > 0 && score < edges[bin] {
        bin -= 1;
    } else if bin + 1 < bins && score >= edges[bin + 1] {
        bin += 1;
    }
    bin
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(u8, f64)]) -> Vec<LabeledScore> {
        pairs
            .iter()
            .map(|&(l, s)| LabeledScore::new(l, s).unwrap())
            .collect()
    }

    #[test]
    fn test_histogram_five_bins() {
        let data = scores(&[(0, 0.0), (0, 0.1), (0, 0.45), (1, 0.61), (1, 0.95), (1, 1.0)]);
        let h = class_histogram(&data, 5).unwrap();
        assert_eq!(h.edges.len(), 6);
        assert_eq!(h.original, vec![2, 0, 1, 0, 0]);
        assert_eq!(h.rewritten, vec![0, 0, 0, 1, 2]);
        assert_eq!(h.max_count(), 2);
    }

    #[test]
    fn test_histogram_counts_sum_to_class_sizes() {
        let data = scores(&[(0, 0.2), (0, 0.7), (1, 0.3), (1, 0.9), (1, 0.5)]);
        let h = class_histogram(&data, 7).unwrap();
        assert_eq!(h.original.iter().sum::<u64>(), 2);
        assert_eq!(h.rewritten.iter().sum::<u64>(), 3);
    }

    #[test]
    fn test_histogram_edges_span_unit_interval() {
        let h = class_histogram(&[], 4).unwrap();
        assert_eq!(h.edges, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(h.bins(), 4);
        assert_eq!(h.max_count(), 0);
    }

    #[test]
    fn test_histogram_bin_agrees_with_edges() {
        // edges[17] of 20 bins is 0.8500000000000001, so 0.85 belongs to bin 16.
        let h = class_histogram(&scores(&[(0, 0.85)]), 20).unwrap();
        assert_eq!(h.original[16], 1);

        for (bins, x, expected) in [(40, 0.975, 38), (50, 0.7, 34)] {
            let h = class_histogram(&scores(&[(1, x)]), bins).unwrap();
            assert_eq!(h.rewritten[expected], 1, "bins={bins} x={x}");
        }

        for bins in 1..=50 {
            for k in 0..=1000 {
                let x = k as f64 / 1000.0;
                let h = class_histogram(&scores(&[(0, x)]), bins).unwrap();
                let bin = h.original.iter().position(|&c| c == 1).unwrap();
                assert!(h.edges[bin] <= x, "bins={bins} x={x}");
                assert!(x < h.edges[bin + 1] || bin == bins - 1, "bins={bins} x={x}");
            }
        }
    }

    #[test]
    fn test_histogram_rejects_zero_bins() {
        assert!(matches!(
            class_histogram(&[], 0),
            Err(Error::InvalidArgument(_))
        ));
    }
}
