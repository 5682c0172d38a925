//! Ordered review queues kept in step with approval status changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tally_types::ApprovalStatus;

/// Approved and Pending keys in order, maintained on every status change so
/// listing them never rescans the whole registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewIndex<K: Ord> {
    approved: BTreeSet<K>,
    pending: BTreeSet<K>,
}

impl<K: Ord + Clone> ReviewIndex<K> {
    pub fn new() -> Self {
        Self {
            approved: BTreeSet::new(),
            pending: BTreeSet::new(),
        }
    }

    /// Move `key` from the queue of `old` (if any) to the queue of `new`.
    pub fn track(&mut self, key: &K, old: Option<ApprovalStatus>, new: ApprovalStatus) {
        match old {
            Some(ApprovalStatus::Approved) => {
                self.approved.remove(key);
            }
            Some(ApprovalStatus::Pending) => {
                self.pending.remove(key);
            }
            Some(ApprovalStatus::Rejected) | None => {}
        }
        match new {
            ApprovalStatus::Approved => {
                self.approved.insert(key.clone());
            }
            ApprovalStatus::Pending => {
                self.pending.insert(key.clone());
            }
            ApprovalStatus::Rejected => {}
        }
    }

    pub fn approved(&self) -> impl Iterator<Item = &K> {
        self.approved.iter()
    }

    pub fn pending(&self) -> impl Iterator<Item = &K> {
        self.pending.iter()
    }

    pub fn is_approved(&self, key: &K) -> bool {
        self.approved.contains(key)
    }

    pub fn approved_count(&self) -> usize {
        self.approved.len()
    }
}

impl<K: Ord + Clone> Default for ReviewIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
