// shuffle.rs - The sortable array between runs, and its shuffle

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::PreconditionError;
use crate::sorting::{SortAlgorithm, SortRun};

/// Fisher-Yates shuffle driven by a seeded generator, for reproducible orders.
pub fn shuffle_with_seed<T>(values: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    values.shuffle(&mut rng);
}

/// The visible array: 1..=N, shuffled and replaced wholesale by run snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBoard {
    values: Vec<u32>,
}

impl SortBoard {
    pub fn new(len: u32) -> Self {
        Self {
            values: (1..=len).collect(),
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|pair| pair[0] <= pair[1])
    }

    pub fn shuffle(&mut self) {
        self.values.shuffle(&mut rand::rng());
    }

    pub fn shuffle_with_seed(&mut self, seed: u64) {
        shuffle_with_seed(&mut self.values, seed);
    }

    /// Back to ascending 1..=N.
    pub fn reset(&mut self) {
        let len = self.values.len() as u32;
        self.values = (1..=len).collect();
    }

    /// Replaces the array with a snapshot published by a run.
    pub fn apply(&mut self, snapshot: Vec<u32>) {
        if snapshot.len() == self.values.len() {
            self.values = snapshot;
        }
    }

    /// Captures the current values into a new run.
    pub fn run(&self, algorithm: SortAlgorithm) -> Result<SortRun, PreconditionError> {
        SortRun::new(algorithm, &self.values)
    }
}

#[cfg(test)]
#[path = "tests/shuffle_tests.rs"]
mod tests;
