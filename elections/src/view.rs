//! Read-side view of an election with ledger counters attached.

use crate::election::Election;
use serde::{Deserialize, Serialize};
use tally_ledger::ScopeTally;
use tally_types::{CandidateId, ElectionId, Identity, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTally {
    pub id: CandidateId,
    pub votes: u64,
}

/// Full current record of an election as seen at `now`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionView {
    pub id: ElectionId,
    pub creator: Identity,
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub active: bool,
    /// `active && start <= now <= end`, evaluated when the view was taken.
    pub votable: bool,
    pub candidates: Vec<CandidateTally>,
    pub total_votes: u64,
    pub winner: Option<CandidateId>,
    pub tallied: bool,
}

impl ElectionView {
    pub(crate) fn new(
        election: &Election,
        tally: Option<&ScopeTally<CandidateId>>,
        now: Timestamp,
    ) -> Self {
        let count = |c: &CandidateId| tally.map_or(0, |t| t.count(c));
        Self {
            id: election.id.clone(),
            creator: election.creator,
            title: election.title.clone(),
            start: election.start,
            end: election.end,
            active: election.active,
            votable: election.is_votable(now),
            candidates: election
                .candidates
                .iter()
                .map(|c| CandidateTally {
                    id: c.clone(),
                    votes: count(c),
                })
                .collect(),
            total_votes: tally.map_or(0, |t| t.total()),
            winner: election.winner.clone(),
            tallied: election.tallied,
        }
    }
}
