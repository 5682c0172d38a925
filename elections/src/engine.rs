//! The multi-election engine: access control, user registry, scheduler, and
//! one vote ledger scope per election.

use crate::election::{Election, ElectionSpec};
use crate::scheduler::ElectionScheduler;
use crate::view::ElectionView;
use serde::{Deserialize, Serialize};
use tally_access::AccessControl;
use tally_ledger::VoteLedger;
use tally_registry::{Participant, ParticipantRegistry};
use tally_types::{
    ApprovalStatus, CandidateId, ContentRef, ElectionError, ElectionId, Identity, Notification,
    Timestamp, VoteScope,
};

/// Many independently scheduled elections under one registry.
///
/// Time-dependent operations take `now`, sampled once by the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElectionsEngine {
    access: AccessControl,
    users: ParticipantRegistry,
    scheduler: ElectionScheduler,
    ledger: VoteLedger<ElectionId, CandidateId>,
}

impl ElectionsEngine {
    pub fn new(owner: Identity) -> Result<Self, ElectionError> {
        Ok(Self {
            access: AccessControl::new(owner)?,
            users: ParticipantRegistry::new(),
            scheduler: ElectionScheduler::new(),
            ledger: VoteLedger::new(),
        })
    }

    // ── Roles ──────────────────────────────────────────────────────────

    pub fn transfer_ownership(
        &mut self,
        caller: &Identity,
        new_owner: Identity,
    ) -> Result<Notification, ElectionError> {
        self.access.transfer_ownership(caller, new_owner)
    }

    pub fn set_admin(
        &mut self,
        caller: &Identity,
        identity: Identity,
        is_admin: bool,
    ) -> Result<Notification, ElectionError> {
        self.access.set_admin(caller, identity, is_admin)
    }

    // ── Users ──────────────────────────────────────────────────────────

    /// Self-registration; always open.
    pub fn register_user(
        &mut self,
        caller: &Identity,
        document: ContentRef,
        profile: ContentRef,
    ) -> Result<Notification, ElectionError> {
        self.users.register(*caller, document, profile)
    }

    pub fn update_user(
        &mut self,
        caller: &Identity,
        document: ContentRef,
        profile: ContentRef,
    ) -> Result<Notification, ElectionError> {
        self.users.update(caller, document, profile)
    }

    /// Record a review outcome. Admin-or-owner. Approval does not gate voting
    /// in this engine.
    pub fn review_user(
        &mut self,
        caller: &Identity,
        user: &Identity,
        status: ApprovalStatus,
    ) -> Result<Notification, ElectionError> {
        self.access.require_admin(caller)?;
        self.users.set_status(user, status)
    }

    // ── Elections ──────────────────────────────────────────────────────

    /// Schedule a new election. The caller must be a registered user or an
    /// admin-or-owner, and becomes the election's creator.
    pub fn create_election(
        &mut self,
        caller: &Identity,
        id: ElectionId,
        spec: ElectionSpec,
        now: Timestamp,
    ) -> Result<Notification, ElectionError> {
        if !self.users.is_registered(caller) && !self.access.is_admin_or_owner(caller) {
            return Err(ElectionError::NotRegistered(caller.to_string()));
        }
        self.scheduler.create(*caller, id, spec, now)
    }

    /// Redefine an election before it starts. Creator or admin-or-owner.
    ///
    /// Checks `AlreadyStarted` before the caller's role, so every caller gets
    /// the same answer once the election has started. Resets all counters and
    /// the tally latch.
    pub fn update_election(
        &mut self,
        caller: &Identity,
        id: &ElectionId,
        spec: ElectionSpec,
        now: Timestamp,
    ) -> Result<Notification, ElectionError> {
        let election = self.election_record(id)?;
        if election.has_started(now) {
            return Err(ElectionError::AlreadyStarted(id.to_string()));
        }
        self.require_manager(caller, election)?;
        let event = self.scheduler.update(id, spec, now)?;
        self.ledger.reset(id);
        Ok(event)
    }

    /// Suspend or resume voting. Creator or admin-or-owner; not after tally.
    pub fn set_election_active(
        &mut self,
        caller: &Identity,
        id: &ElectionId,
        active: bool,
    ) -> Result<Notification, ElectionError> {
        let election = self.election_record(id)?;
        self.require_manager(caller, election)?;
        self.scheduler.set_active(id, active)
    }

    // ── Votes ──────────────────────────────────────────────────────────

    /// Cast the caller's single vote in `election` for `candidate`.
    pub fn vote(
        &mut self,
        caller: &Identity,
        election: &ElectionId,
        candidate: CandidateId,
        now: Timestamp,
    ) -> Result<Notification, ElectionError> {
        let record = self.election_record(election)?;
        if !record.is_votable(now) {
            return Err(ElectionError::NotVotable(election.to_string()));
        }
        if !self.users.is_registered(caller) {
            return Err(ElectionError::NotRegistered(caller.to_string()));
        }
        if self.ledger.has_voted(election, caller) {
            return Err(ElectionError::AlreadyVoted(caller.to_string()));
        }
        if !record.has_candidate(&candidate) {
            return Err(ElectionError::InvalidTarget(format!(
                "{candidate} in {election}"
            )));
        }
        self.ledger.cast(election, *caller, candidate.clone())?;
        tracing::debug!(voter = %caller, %election, %candidate, "vote cast");
        Ok(Notification::VoteCast {
            voter: *caller,
            scope: VoteScope::Election {
                election: election.clone(),
                candidate,
            },
        })
    }

    /// Compute and latch the result after the election has ended.
    /// Admin-or-owner only; the creator may manage but not tally.
    ///
    /// The winner is the candidate with the strictly highest count, scanning in
    /// ballot order, so ties go to the candidate listed first. An election
    /// without votes has no winner.
    pub fn tally(
        &mut self,
        caller: &Identity,
        id: &ElectionId,
        now: Timestamp,
    ) -> Result<Notification, ElectionError> {
        let election = self.election_record(id)?;
        self.access.require_admin(caller)?;
        if election.tallied {
            return Err(ElectionError::AlreadyTallied(id.to_string()));
        }
        if !election.has_ended(now) {
            return Err(ElectionError::TooEarly(format!(
                "election {id} ends at {}",
                election.end
            )));
        }
        let leader = self.ledger.leader(id, &election.candidates);
        let (winner, votes) = match leader {
            Some((candidate, votes)) => (Some(candidate), votes),
            None => (None, 0),
        };
        self.scheduler.record_result(id, winner.clone())?;
        tracing::info!(election = %id, winner = ?winner, votes, total = self.ledger.total(id), "results tallied");
        Ok(Notification::ResultsTallied {
            id: id.clone(),
            winner,
            votes,
        })
    }

    /// The latched winner and its vote count.
    pub fn winner(
        &self,
        id: &ElectionId,
    ) -> Result<(Option<CandidateId>, u64), ElectionError> {
        let election = self.election_record(id)?;
        if !election.tallied {
            return Err(ElectionError::NotTalliedYet(id.to_string()));
        }
        let votes = election
            .winner
            .as_ref()
            .map_or(0, |w| self.ledger.count(id, w));
        Ok((election.winner.clone(), votes))
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    pub fn user(&self, identity: &Identity) -> Option<&Participant> {
        self.users.get(identity)
    }

    pub fn users(&self) -> &ParticipantRegistry {
        &self.users
    }

    pub fn election(&self, id: &ElectionId, now: Timestamp) -> Option<ElectionView> {
        self.scheduler
            .get(id)
            .map(|e| ElectionView::new(e, self.ledger.scope(id), now))
    }

    /// Every election id, in creation order.
    pub fn elections(&self) -> Vec<ElectionId> {
        self.scheduler.iter().map(|e| e.id.clone()).collect()
    }

    /// Elections votable at `now`, in creation order.
    pub fn open_elections(&self, now: Timestamp) -> Vec<ElectionId> {
        self.scheduler
            .iter()
            .filter(|e| e.is_votable(now))
            .map(|e| e.id.clone())
            .collect()
    }

    pub fn elections_by_creator(&self, creator: &Identity) -> Vec<ElectionId> {
        self.scheduler
            .created_by(*creator)
            .map(|e| e.id.clone())
            .collect()
    }

    /// Per-candidate counts in ballot order.
    pub fn candidate_votes(&self, id: &ElectionId) -> Option<Vec<(CandidateId, u64)>> {
        self.scheduler.get(id).map(|e| {
            e.candidates
                .iter()
                .map(|c| (c.clone(), self.ledger.count(id, c)))
                .collect()
        })
    }

    pub fn total_votes(&self, id: &ElectionId) -> u64 {
        self.ledger.total(id)
    }

    pub fn has_voted(&self, id: &ElectionId, voter: &Identity) -> bool {
        self.ledger.has_voted(id, voter)
    }

    pub fn receipt(&self, id: &ElectionId, voter: &Identity) -> Option<&CandidateId> {
        self.ledger.receipt(id, voter)
    }

    /// Elections `voter` has voted in, in creation order.
    pub fn voted_elections(&self, voter: &Identity) -> Vec<ElectionId> {
        self.scheduler
            .iter()
            .filter(|e| self.ledger.has_voted(&e.id, voter))
            .map(|e| e.id.clone())
            .collect()
    }

    fn election_record(&self, id: &ElectionId) -> Result<&Election, ElectionError> {
        self.scheduler
            .get(id)
            .ok_or_else(|| ElectionError::InvalidTarget(id.to_string()))
    }

    fn require_manager(&self, caller: &Identity, election: &Election) -> Result<(), ElectionError> {
        if &election.creator == caller || self.access.is_admin_or_owner(caller) {
            Ok(())
        } else {
            tracing::warn!(caller = %caller, election = %election.id, "election management refused");
            Err(ElectionError::Unauthorized(caller.to_string()))
        }
    }
}
