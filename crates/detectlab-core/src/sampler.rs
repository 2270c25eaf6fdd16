//! Seeded test-set sampling.
//!
//! Picks which abstracts go into a detector test set and whether each one is
//! shown in its original or rewritten form. The draw happens in two fixed
//! phases on one ChaCha8 stream: first every index (without replacement), then
//! one fair bit per index in the order the indices came out. The same seed,
//! population and count therefore always reproduce the same test set.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Seed used by the study when none is given.
pub const DEFAULT_SEED: u64 = 1;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which text of an abstract is presented to the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Original,
    Rewritten,
}

impl Variant {
    /// Map a drawn bit to a variant (1 = original, 0 = rewritten).
    pub fn from_bit(bit: u8) -> Self {
        if bit == 1 {
            Variant::Original
        } else {
            Variant::Rewritten
        }
    }

    /// Short tag used in experimenter notes.
    pub fn tag(self) -> &'static str {
        match self {
            Variant::Original => "OR",
            Variant::Rewritten => "RE",
        }
    }

    /// Heading written above the abstract in the test-set text file.
    pub fn heading(self) -> &'static str {
        match self {
            Variant::Original => "ORIGINAL ABSTRACT",
            Variant::Rewritten => "REWRITTEN ABSTRACT",
        }
    }

    /// Ground-truth label: 1 for the positive (rewritten) class.
    pub fn is_rewritten(self) -> u8 {
        match self {
            Variant::Original => 0,
            Variant::Rewritten => 1,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One selected abstract: its position in the source collection and the
/// variant to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleAssignment {
    pub index: usize,
    pub variant: Variant,
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Draw `sample_count` distinct indices from `0..population_size` and a random
/// variant for each.
///
/// Fails with [`Error::InvalidArgument`] when `sample_count > population_size`.
pub fn sample(
    population_size: usize,
    sample_count: usize,
    seed: u64,
) -> Result<Vec<SampleAssignment>> {
    if sample_count > population_size {
        return Err(Error::invalid(format!(
            "sample count {sample_count} exceeds population size {population_size}"
        )));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let indices = rand::seq::index::sample(&mut rng, population_size, sample_count).into_vec();

    let assignments: Vec<SampleAssignment> = indices
        .into_iter()
        .map(|index| SampleAssignment {
            index,
            variant: Variant::from_bit(rng.random_range(0..=1u8)),
        })
        .collect();

    log::debug!(
        "sampled {} of {} (seed {}): {} rewritten",
        assignments.len(),
        population_size,
        seed,
        assignments
            .iter()
            .filter(|a| a.variant == Variant::Rewritten)
            .count()
    );

    Ok(assignments)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
