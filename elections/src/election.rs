//! Election records and their schedule validation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tally_types::{CandidateId, ElectionError, ElectionId, Identity, Timestamp};

/// Caller-supplied definition of an election, used for creation and updates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSpec {
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
    /// Ballot order; also the tie-break order of the tally.
    pub candidates: Vec<CandidateId>,
}

impl ElectionSpec {
    /// Check the schedule and candidate list against `now`.
    ///
    /// The start must be strictly in the future and the end strictly after
    /// the start. Candidates must be non-empty and unique.
    pub fn validate(&self, now: Timestamp) -> Result<(), ElectionError> {
        if self.start <= now || self.end <= self.start {
            return Err(ElectionError::InvalidTimeRange {
                start: self.start.as_secs(),
                end: self.end.as_secs(),
                now: now.as_secs(),
            });
        }
        if self.candidates.is_empty() {
            return Err(ElectionError::InvalidArgument(
                "an election needs at least one candidate".into(),
            ));
        }
        let mut seen = HashSet::with_capacity(self.candidates.len());
        for candidate in &self.candidates {
            if candidate.is_empty() {
                return Err(ElectionError::InvalidArgument(
                    "candidate id cannot be empty".into(),
                ));
            }
            if !seen.insert(candidate) {
                return Err(ElectionError::DuplicateId(candidate.to_string()));
            }
        }
        Ok(())
    }
}

/// A scheduled election. Counters live in the vote ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    pub id: ElectionId,
    pub creator: Identity,
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub active: bool,
    pub candidates: Vec<CandidateId>,
    pub winner: Option<CandidateId>,
    /// One-way latch, set by the tally.
    pub tallied: bool,
}

impl Election {
    pub(crate) fn new(id: ElectionId, creator: Identity, spec: ElectionSpec) -> Self {
        Self {
            id,
            creator,
            title: spec.title,
            start: spec.start,
            end: spec.end,
            active: true,
            candidates: spec.candidates,
            winner: None,
            tallied: false,
        }
    }

    /// Replace the definition wholesale and void any tally state.
    pub(crate) fn redefine(&mut self, spec: ElectionSpec) {
        self.title = spec.title;
        self.start = spec.start;
        self.end = spec.end;
        self.candidates = spec.candidates;
        self.winner = None;
        self.tallied = false;
    }

    pub fn is_votable(&self, now: Timestamp) -> bool {
        self.active && now.is_within(self.start, self.end)
    }

    pub fn has_started(&self, now: Timestamp) -> bool {
        now >= self.start
    }

    pub fn has_ended(&self, now: Timestamp) -> bool {
        now > self.end
    }

    pub fn has_candidate(&self, candidate: &CandidateId) -> bool {
        self.candidates.contains(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(start: u64, end: u64, candidates: &[&str]) -> ElectionSpec {
        ElectionSpec {
            title: "council".into(),
            start: Timestamp::new(start),
            end: Timestamp::new(end),
            candidates: candidates.iter().map(|c| CandidateId::new(*c)).collect(),
        }
    }

    #[test]
    fn start_must_be_in_the_future() {
        let now = Timestamp::new(100);
        assert!(spec(101, 200, &["a"]).validate(now).is_ok());
        assert!(matches!(
            spec(100, 200, &["a"]).validate(now),
            Err(ElectionError::InvalidTimeRange { .. })
        ));
    }

    #[test]
    fn end_must_follow_start() {
        let now = Timestamp::new(100);
        assert!(matches!(
            spec(150, 150, &["a"]).validate(now),
            Err(ElectionError::InvalidTimeRange { .. })
        ));
    }

    #[test]
    fn candidates_must_be_unique_and_present() {
        let now = Timestamp::new(0);
        assert!(matches!(
            spec(10, 20, &[]).validate(now),
            Err(ElectionError::InvalidArgument(_))
        ));
        assert!(matches!(
            spec(10, 20, &["a", "b", "a"]).validate(now),
            Err(ElectionError::DuplicateId(_))
        ));
        assert!(matches!(
            spec(10, 20, &["a", " "]).validate(now),
            Err(ElectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn votable_window_is_closed_on_both_ends() {
        let election = Election::new(
            ElectionId::new("e"),
            Identity::new([1; 32]),
            spec(10, 20, &["a"]),
        );
        assert!(!election.is_votable(Timestamp::new(9)));
        assert!(election.is_votable(Timestamp::new(10)));
        assert!(election.is_votable(Timestamp::new(20)));
        assert!(!election.is_votable(Timestamp::new(21)));
        assert!(!election.has_ended(Timestamp::new(20)));
        assert!(election.has_ended(Timestamp::new(21)));
    }
}
