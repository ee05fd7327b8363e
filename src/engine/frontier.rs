//! Weighted frontier of growth candidates
//!
//! Maps not-yet-filled cells adjacent to the filled region to a selection
//! weight. Recomputing every weight on every pick would be quadratic in
//! frontier size, so owning algorithms reweigh in batches via
//! [`WeightedFrontier::reweigh`] and let individual weights go slightly
//! stale between batches.

use rand::Rng;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// One frontier candidate with its selection weight
#[derive(Clone, Copy, Debug)]
pub struct FrontierEntry {
    /// Cell coordinate as `[x, y]`
    pub position: [i32; 2],
    /// Non-negative selection weight
    pub weight: f64,
}

/// Coordinate-keyed candidate set supporting weighted random picks
///
/// Entries live in a dense vector for cumulative-sum sampling, with a
/// coordinate map alongside for O(1) membership and swap-removal. A
/// coordinate appears at most once.
#[derive(Clone, Debug, Default)]
pub struct WeightedFrontier {
    entries: Vec<FrontierEntry>,
    slots: HashMap<[i32; 2], usize>,
}

impl WeightedFrontier {
    /// Create an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the frontier has no candidates
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the coordinate is already a candidate
    pub fn contains(&self, position: [i32; 2]) -> bool {
        self.slots.contains_key(&position)
    }

    /// Insert a candidate unless the coordinate is already present
    ///
    /// Negative weights are clamped to zero. Returns whether the entry
    /// was inserted.
    pub fn insert(&mut self, position: [i32; 2], weight: f64) -> bool {
        if self.slots.contains_key(&position) {
            return false;
        }
        self.slots.insert(position, self.entries.len());
        self.entries.push(FrontierEntry {
            position,
            weight: weight.max(0.0),
        });
        true
    }

    /// Remove a candidate; absent coordinates are a no-op
    pub fn remove(&mut self, position: [i32; 2]) -> bool {
        let Some(slot) = self.slots.remove(&position) else {
            return false;
        };
        self.entries.swap_remove(slot);
        if let Some(moved) = self.entries.get(slot) {
            self.slots.insert(moved.position, slot);
        }
        true
    }

    /// Pick a candidate with probability proportional to its weight
    ///
    /// Uses cumulative-sum sampling over a single uniform draw. Falls
    /// back to a uniform choice when the total weight is zero and
    /// returns `None` when the frontier is empty.
    pub fn pick(&self, rng: &mut StdRng) -> Option<[i32; 2]> {
        if self.entries.is_empty() {
            return None;
        }
        let total: f64 = self.entries.iter().map(|entry| entry.weight).sum();
        if total <= 0.0 {
            let index = rng.random_range(0..self.entries.len());
            return self.entries.get(index).map(|entry| entry.position);
        }
        let mut remaining = rng.random::<f64>() * total;
        for entry in &self.entries {
            remaining -= entry.weight;
            if remaining <= 0.0 {
                return Some(entry.position);
            }
        }
        self.entries.last().map(|entry| entry.position)
    }

    /// Recompute every candidate's weight from current state
    pub fn reweigh(&mut self, mut weight_fn: impl FnMut([i32; 2]) -> f64) {
        for entry in &mut self.entries {
            entry.weight = weight_fn(entry.position).max(0.0);
        }
    }

    /// Iterate candidates in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &FrontierEntry> + '_ {
        self.entries.iter()
    }

    /// Sum of all candidate weights
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }
}
