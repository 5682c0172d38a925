//! Vote admission across scopes.

use crate::tally::ScopeTally;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tally_types::{ElectionError, Identity};

/// Receipts and counters for every scope that has received a vote.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteLedger<S: Eq + Hash, T: Eq + Hash> {
    scopes: HashMap<S, ScopeTally<T>>,
}

impl<S, T> VoteLedger<S, T>
where
    S: Eq + Hash + Clone + Debug,
    T: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self {
            scopes: HashMap::new(),
        }
    }

    /// Admit one vote from `voter` for `target` in `scope`.
    ///
    /// Fails with `AlreadyVoted` if `voter` holds a receipt in this scope; in
    /// that case nothing changes. On success the receipt, the target counter
    /// and the scope total move together.
    pub fn cast(&mut self, scope: &S, voter: Identity, target: T) -> Result<(), ElectionError> {
        if self.has_voted(scope, &voter) {
            return Err(ElectionError::AlreadyVoted(voter.to_string()));
        }
        tracing::trace!(?scope, voter = %voter, ?target, "vote admitted");
        self.scopes
            .entry(scope.clone())
            .or_default()
            .record(voter, target);
        Ok(())
    }

    pub fn has_voted(&self, scope: &S, voter: &Identity) -> bool {
        self.scopes
            .get(scope)
            .is_some_and(|tally| tally.has_voted(voter))
    }

    pub fn receipt(&self, scope: &S, voter: &Identity) -> Option<&T> {
        self.scopes.get(scope).and_then(|tally| tally.receipt(voter))
    }

    pub fn count(&self, scope: &S, target: &T) -> u64 {
        self.scopes.get(scope).map_or(0, |tally| tally.count(target))
    }

    pub fn total(&self, scope: &S) -> u64 {
        self.scopes.get(scope).map_or(0, |tally| tally.total())
    }

    pub fn scope(&self, scope: &S) -> Option<&ScopeTally<T>> {
        self.scopes.get(scope)
    }

    /// Leading target of `scope` among `order`; see [`crate::leader`].
    pub fn leader<'a, I>(&self, scope: &S, order: I) -> Option<(T, u64)>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.scopes.get(scope).and_then(|tally| tally.leader(order))
    }

    /// Drop every receipt and counter of `scope`.
    pub fn reset(&mut self, scope: &S) {
        if self.scopes.remove(scope).is_some() {
            tracing::debug!(?scope, "scope counters reset");
        }
    }

    /// Scopes in which `voter` holds a receipt, in no particular order.
    pub fn scopes_voted_by(&self, voter: &Identity) -> Vec<&S> {
        self.scopes
            .iter()
            .filter(|(_, tally)| tally.has_voted(voter))
            .map(|(scope, _)| scope)
            .collect()
    }
}

impl<S, T> Default for VoteLedger<S, T>
where
    S: Eq + Hash + Clone + Debug,
    T: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
