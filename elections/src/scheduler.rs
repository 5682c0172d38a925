//! Election scheduling: creation, redefinition, activity, and the tally latch.

use crate::election::{Election, ElectionSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tally_types::{CandidateId, ElectionError, ElectionId, Identity, Notification, Timestamp};

/// All elections, plus an append-only index in creation order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ElectionScheduler {
    elections: HashMap<ElectionId, Election>,
    index: Vec<ElectionId>,
}

impl ElectionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &mut self,
        creator: Identity,
        id: ElectionId,
        spec: ElectionSpec,
        now: Timestamp,
    ) -> Result<Notification, ElectionError> {
        if id.is_empty() {
            return Err(ElectionError::InvalidArgument(
                "election id cannot be empty".into(),
            ));
        }
        if self.elections.contains_key(&id) {
            return Err(ElectionError::DuplicateId(id.to_string()));
        }
        spec.validate(now)?;
        tracing::debug!(election = %id, creator = %creator, start = %spec.start, end = %spec.end, "election created");
        self.index.push(id.clone());
        self.elections
            .insert(id.clone(), Election::new(id.clone(), creator, spec));
        Ok(Notification::ElectionCreated { id, creator })
    }

    /// Redefine an election that has not started yet.
    ///
    /// Fails with `AlreadyStarted` once `now >= start`. Clears the winner and
    /// the tally latch; the caller resets the ledger scope.
    pub fn update(
        &mut self,
        id: &ElectionId,
        spec: ElectionSpec,
        now: Timestamp,
    ) -> Result<Notification, ElectionError> {
        let election = self
            .elections
            .get_mut(id)
            .ok_or_else(|| ElectionError::InvalidTarget(id.to_string()))?;
        if election.has_started(now) {
            return Err(ElectionError::AlreadyStarted(id.to_string()));
        }
        spec.validate(now)?;
        election.redefine(spec);
        tracing::debug!(election = %id, "election redefined");
        Ok(Notification::ElectionUpdated { id: id.clone() })
    }

    pub fn set_active(
        &mut self,
        id: &ElectionId,
        active: bool,
    ) -> Result<Notification, ElectionError> {
        let election = self
            .elections
            .get_mut(id)
            .ok_or_else(|| ElectionError::InvalidTarget(id.to_string()))?;
        if election.tallied {
            return Err(ElectionError::AlreadyTallied(id.to_string()));
        }
        election.active = active;
        tracing::debug!(election = %id, active, "election activity set");
        Ok(Notification::ElectionActivityChanged {
            id: id.clone(),
            active,
        })
    }

    /// Latch the result. Fails with `AlreadyTallied` if already latched.
    pub fn record_result(
        &mut self,
        id: &ElectionId,
        winner: Option<CandidateId>,
    ) -> Result<(), ElectionError> {
        let election = self
            .elections
            .get_mut(id)
            .ok_or_else(|| ElectionError::InvalidTarget(id.to_string()))?;
        if election.tallied {
            return Err(ElectionError::AlreadyTallied(id.to_string()));
        }
        election.winner = winner;
        election.tallied = true;
        Ok(())
    }

    pub fn get(&self, id: &ElectionId) -> Option<&Election> {
        self.elections.get(id)
    }

    /// Elections in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Election> {
        self.index.iter().filter_map(|id| self.elections.get(id))
    }

    /// Elections created by `creator`, in creation order.
    pub fn created_by(&self, creator: Identity) -> impl Iterator<Item = &Election> + '_ {
        self.iter().filter(move |e| e.creator == creator)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(start: u64, end: u64) -> ElectionSpec {
        ElectionSpec {
            title: "board".into(),
            start: Timestamp::new(start),
            end: Timestamp::new(end),
            candidates: vec![CandidateId::new("c1"), CandidateId::new("c2")],
        }
    }

    fn creator() -> Identity {
        Identity::new([3; 32])
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let mut scheduler = ElectionScheduler::new();
        let now = Timestamp::new(0);
        scheduler
            .create(creator(), "e1".into(), spec(10, 20), now)
            .unwrap();
        let err = scheduler
            .create(creator(), "e1".into(), spec(30, 40), now)
            .unwrap_err();
        assert!(matches!(err, ElectionError::DuplicateId(_)));
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.get(&"e1".into()).unwrap().start, Timestamp::new(10));
    }

    #[test]
    fn update_after_start_is_refused_and_changes_nothing() {
        let mut scheduler = ElectionScheduler::new();
        scheduler
            .create(creator(), "e1".into(), spec(10, 20), Timestamp::new(0))
            .unwrap();
        let before = scheduler.get(&"e1".into()).unwrap().clone();
        let err = scheduler
            .update(&"e1".into(), spec(30, 40), Timestamp::new(10))
            .unwrap_err();
        assert!(matches!(err, ElectionError::AlreadyStarted(_)));
        assert_eq!(scheduler.get(&"e1".into()).unwrap(), &before);
    }

    #[test]
    fn update_before_start_replaces_definition() {
        let mut scheduler = ElectionScheduler::new();
        scheduler
            .create(creator(), "e1".into(), spec(10, 20), Timestamp::new(0))
            .unwrap();
        let mut next = spec(50, 60);
        next.candidates = vec![CandidateId::new("x")];
        scheduler.update(&"e1".into(), next, Timestamp::new(5)).unwrap();
        let election = scheduler.get(&"e1".into()).unwrap();
        assert_eq!(election.start, Timestamp::new(50));
        assert_eq!(election.candidates, vec![CandidateId::new("x")]);
        assert!(!election.tallied);
    }

    #[test]
    fn result_latch_is_one_way() {
        let mut scheduler = ElectionScheduler::new();
        scheduler
            .create(creator(), "e1".into(), spec(10, 20), Timestamp::new(0))
            .unwrap();
        scheduler
            .record_result(&"e1".into(), Some("c1".into()))
            .unwrap();
        assert!(matches!(
            scheduler.record_result(&"e1".into(), Some("c2".into())),
            Err(ElectionError::AlreadyTallied(_))
        ));
        assert!(matches!(
            scheduler.set_active(&"e1".into(), false),
            Err(ElectionError::AlreadyTallied(_))
        ));
        let election = scheduler.get(&"e1".into()).unwrap();
        assert_eq!(election.winner, Some(CandidateId::new("c1")));
        assert!(election.active);
    }

    #[test]
    fn index_keeps_creation_order() {
        let mut scheduler = ElectionScheduler::new();
        let other = Identity::new([4; 32]);
        for (id, who) in [("z", creator()), ("a", other), ("m", creator())] {
            scheduler
                .create(who, id.into(), spec(10, 20), Timestamp::new(0))
                .unwrap();
        }
        let ids: Vec<&str> = scheduler.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
        let mine: Vec<&str> = scheduler
            .created_by(creator())
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(mine, vec!["z", "m"]);
    }
}
