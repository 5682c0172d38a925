//! Per-scope counters and the winner scan.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use tally_types::Identity;

/// Receipts and counters for one scope.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScopeTally<T: Eq + Hash> {
    receipts: HashMap<Identity, T>,
    counts: HashMap<T, u64>,
    total: u64,
}

impl<T: Eq + Hash + Clone> ScopeTally<T> {
    pub fn new() -> Self {
        Self {
            receipts: HashMap::new(),
            counts: HashMap::new(),
            total: 0,
        }
    }

    pub fn has_voted(&self, voter: &Identity) -> bool {
        self.receipts.contains_key(voter)
    }

    /// The target `voter` voted for, if any.
    pub fn receipt(&self, voter: &Identity) -> Option<&T> {
        self.receipts.get(voter)
    }

    pub fn count(&self, target: &T) -> u64 {
        self.counts.get(target).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn voters(&self) -> usize {
        self.receipts.len()
    }

    /// Record one vote. The caller has already checked `has_voted`.
    pub(crate) fn record(&mut self, voter: Identity, target: T) {
        *self.counts.entry(target.clone()).or_insert(0) += 1;
        self.receipts.insert(voter, target);
        self.total += 1;
    }

    /// Leading target among `order`, by the strictly-greater scan of [`leader`].
    pub fn leader<'a, I>(&self, order: I) -> Option<(T, u64)>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        leader(order.into_iter().map(|t| (t.clone(), self.count(t))))
    }
}

impl<T: Eq + Hash + Clone> Default for ScopeTally<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan `entries` in order and return the first entry whose count is strictly
/// greater than every entry before it.
///
/// The running best only changes on a strictly greater count, so ties go to
/// the earliest entry and a scope where nothing received a vote has no leader.
pub fn leader<T, I>(entries: I) -> Option<(T, u64)>
where
    I: IntoIterator<Item = (T, u64)>,
{
    let mut best = None;
    let mut best_count = 0u64;
    for (target, count) in entries {
        if count > best_count {
            best_count = count;
            best = Some((target, count));
        }
    }
    best
}
