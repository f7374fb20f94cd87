//! Deduplicated sliding window with oldest-first eviction

use super::value::{window_value, WindowValue};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use std::num::NonZeroUsize;

/// Mean of `values` rounded to two decimals, `0.0` for an empty slice.
pub fn average_of(values: &[WindowValue]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let sum: f64 = values.iter().map(|v| v.get()).sum();
    let mean = sum / values.len() as f64;
    (mean * 100.0).round() / 100.0
}

/// Fixed-capacity window of unique numbers in insertion order
#[derive(Debug, Clone)]
pub struct WindowStore {
    values: VecDeque<WindowValue>,
    members: HashSet<WindowValue>,
    capacity: NonZeroUsize,
}

impl WindowStore {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity.get()),
            members: HashSet::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Merge upstream candidates into the window.
    ///
    /// Candidates are visited in order. A value is appended when it is not
    /// already a member, where membership includes values appended earlier
    /// in the same call. Once the whole batch is in, the front of the window
    /// is trimmed back to capacity in a single pass.
    ///
    /// # Returns
    /// The values appended by this call, in insertion order and before
    /// eviction. A value can appear here and already be evicted when the
    /// batch alone overflows the window.
    pub fn merge(&mut self, candidates: &[Value]) -> Vec<WindowValue> {
        let mut added = Vec::new();

        for value in candidates.iter().filter_map(window_value) {
            if self.members.insert(value) {
                self.values.push_back(value);
                added.push(value);
            }
        }

        self.trim();
        added
    }

    fn trim(&mut self) {
        let overflow = self.values.len().saturating_sub(self.capacity.get());
        for evicted in self.values.drain(..overflow) {
            self.members.remove(&evicted);
        }
    }

    /// Independent copy of the window, oldest first
    pub fn snapshot(&self) -> Vec<WindowValue> {
        self.values.iter().copied().collect()
    }

    /// Average of the current window, see [`average_of`]
    pub fn average(&self) -> f64 {
        average_of(&self.snapshot())
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: impl Into<WindowValue>) -> bool {
        self.members.contains(&value.into())
    }
}
