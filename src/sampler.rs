use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::candidates::Candidate;

/// Hard stop on draws, whether or not the target size was reached.
pub const MAX_ATTEMPTS: usize = 100;

/// Lists longer than this get three picks instead of one.
const SMALL_LIST_LEN: usize = 10;

/// Chosen candidates keyed by their index in the source list.
pub type Selection = BTreeMap<usize, Candidate>;

/// Source of uniformly distributed indices.
pub trait IndexSource {
    /// Next index in `[0, upper)`. `upper` is never zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Pseudo-random indices from a generator seeded once from the wall clock.
pub struct ClockSeededSource {
    rng: StdRng,
}

impl ClockSeededSource {
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        let seed = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros());
        Self::with_seed(seed as u64)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ClockSeededSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSource for ClockSeededSource {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

pub fn target_size(len: usize) -> usize {
    if len > SMALL_LIST_LEN {
        3
    } else {
        1
    }
}

/// Draw indices until `target_size` distinct ones are collected or
/// `MAX_ATTEMPTS` draws are spent. May return fewer than the target.
pub fn select<S: IndexSource>(candidates: &[Candidate], source: &mut S) -> Selection {
    let mut selection = Selection::new();
    if candidates.is_empty() {
        return selection;
    }

    let wanted = target_size(candidates.len());
    let mut attempts = 0;
    while attempts < MAX_ATTEMPTS && selection.len() < wanted {
        attempts += 1;
        let index = source.next_index(candidates.len());
        // A misbehaving source only costs an attempt.
        if let Some(candidate) = candidates.get(index) {
            selection.entry(index).or_insert_with(|| candidate.clone());
        }
    }

    debug!(
        "Selected {}/{} candidates in {} draws",
        selection.len(),
        wanted,
        attempts
    );
    selection
}
