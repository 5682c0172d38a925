//! The fixed-workflow engine: access control, registries, phase cursor, and
//! vote ledger for one global session.

use crate::phase::{self, Transition};
use crate::view::ProposalView;
use serde::{Deserialize, Serialize};
use tally_access::AccessControl;
use tally_ledger::VoteLedger;
use tally_registry::{Participant, ParticipantRegistry, ProposalRegistry};
use tally_types::{
    ApprovalStatus, ContentRef, ElectionError, Identity, Notification, ProposalId, VoteScope,
    VotingStatus, WorkflowStatus,
};

/// One global election session.
///
/// Every mutating method checks all of its preconditions before writing
/// anything, and returns exactly one [`Notification`] on success.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowEngine {
    access: AccessControl,
    voters: ParticipantRegistry,
    proposals: ProposalRegistry,
    ledger: VoteLedger<(), ProposalId>,
    status: WorkflowStatus,
}

impl WorkflowEngine {
    /// A fresh session owned by `owner`, registering voters.
    pub fn new(owner: Identity) -> Result<Self, ElectionError> {
        Ok(Self {
            access: AccessControl::new(owner)?,
            voters: ParticipantRegistry::new(),
            proposals: ProposalRegistry::new(),
            ledger: VoteLedger::new(),
            status: WorkflowStatus::default(),
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

    // ── Voters ─────────────────────────────────────────────────────────

    /// Self-registration. Only while registering voters.
    pub fn register_voter(
        &mut self,
        caller: &Identity,
        document: ContentRef,
        profile: ContentRef,
    ) -> Result<Notification, ElectionError> {
        phase::require(self.status, WorkflowStatus::RegisteringVoters)?;
        self.voters.register(*caller, document, profile)
    }

    /// Rewrite the caller's own profile; the voter goes back to Pending.
    pub fn update_voter(
        &mut self,
        caller: &Identity,
        document: ContentRef,
        profile: ContentRef,
    ) -> Result<Notification, ElectionError> {
        self.voters.update(caller, document, profile)
    }

    /// Approve or reject a voter. Admin-or-owner, any phase.
    pub fn review_voter(
        &mut self,
        caller: &Identity,
        voter: &Identity,
        status: ApprovalStatus,
    ) -> Result<Notification, ElectionError> {
        self.access.require_admin(caller)?;
        self.voters.set_status(voter, status)
    }

    // ── Proposals ──────────────────────────────────────────────────────

    /// Register a proposal under the next sequential id. Admin-or-owner,
    /// only while proposal registration is open.
    pub fn register_proposal(
        &mut self,
        caller: &Identity,
        name: String,
        document: ContentRef,
        profile: ContentRef,
    ) -> Result<Notification, ElectionError> {
        self.access.require_admin(caller)?;
        phase::require(self.status, WorkflowStatus::ProposalsRegistrationStarted)?;
        self.proposals.register(name, document, profile)
    }

    /// Rewrite a proposal; it goes back to Pending. Admin-or-owner.
    pub fn update_proposal(
        &mut self,
        caller: &Identity,
        id: ProposalId,
        name: String,
        document: ContentRef,
        profile: ContentRef,
    ) -> Result<Notification, ElectionError> {
        self.access.require_admin(caller)?;
        self.proposals.update(id, name, document, profile)
    }

    /// Approve or reject a proposal. Admin-or-owner, any phase.
    pub fn review_proposal(
        &mut self,
        caller: &Identity,
        id: ProposalId,
        status: ApprovalStatus,
    ) -> Result<Notification, ElectionError> {
        self.access.require_admin(caller)?;
        self.proposals.set_status(id, status)
    }

    // ── Phases ─────────────────────────────────────────────────────────

    /// Move the phase cursor one step. Admin-or-owner.
    ///
    /// Tallying additionally marks every currently Approved proposal as
    /// Completed; proposals never approved stay Pending and are excluded from
    /// the winner scan.
    pub fn advance(
        &mut self,
        caller: &Identity,
        transition: Transition,
    ) -> Result<Notification, ElectionError> {
        self.access.require_admin(caller)?;
        let current = phase::next(self.status, transition)?;
        let previous = std::mem::replace(&mut self.status, current);
        if transition == Transition::TallyVotes {
            let completed = self.proposals.complete_approved();
            tracing::info!(completed, total_votes = self.total_votes(), "votes tallied");
        }
        tracing::info!(from = %previous, to = %current, "workflow advanced");
        Ok(Notification::WorkflowStatusChanged { previous, current })
    }

    pub fn start_proposals_registration(
        &mut self,
        caller: &Identity,
    ) -> Result<Notification, ElectionError> {
        self.advance(caller, Transition::StartProposalsRegistration)
    }

    pub fn end_proposals_registration(
        &mut self,
        caller: &Identity,
    ) -> Result<Notification, ElectionError> {
        self.advance(caller, Transition::EndProposalsRegistration)
    }

    pub fn start_voting_session(&mut self, caller: &Identity) -> Result<Notification, ElectionError> {
        self.advance(caller, Transition::StartVotingSession)
    }

    pub fn end_voting_session(&mut self, caller: &Identity) -> Result<Notification, ElectionError> {
        self.advance(caller, Transition::EndVotingSession)
    }

    /// Close the session. No winner is computed here; see [`Self::winner`].
    pub fn tally_votes(&mut self, caller: &Identity) -> Result<Notification, ElectionError> {
        self.advance(caller, Transition::TallyVotes)
    }

    // ── Votes ──────────────────────────────────────────────────────────

    /// Cast the caller's single vote for `proposal`.
    pub fn vote(
        &mut self,
        caller: &Identity,
        proposal: ProposalId,
    ) -> Result<Notification, ElectionError> {
        phase::require(self.status, WorkflowStatus::VotingSessionStarted)?;
        let voter = self
            .voters
            .get(caller)
            .ok_or_else(|| ElectionError::NotRegistered(caller.to_string()))?;
        if !voter.approval.is_approved() {
            return Err(ElectionError::NotApproved(caller.to_string()));
        }
        if self.ledger.has_voted(&(), caller) {
            return Err(ElectionError::AlreadyVoted(caller.to_string()));
        }
        if !self.proposals.is_approved(proposal) {
            return Err(ElectionError::InvalidTarget(proposal.to_string()));
        }
        self.ledger.cast(&(), *caller, proposal)?;
        tracing::debug!(voter = %caller, %proposal, "vote cast");
        Ok(Notification::VoteCast {
            voter: *caller,
            scope: VoteScope::Session { proposal },
        })
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    pub fn voter(&self, identity: &Identity) -> Option<&Participant> {
        self.voters.get(identity)
    }

    pub fn voters(&self) -> &ParticipantRegistry {
        &self.voters
    }

    pub fn proposal(&self, id: ProposalId) -> Option<ProposalView> {
        self.proposals
            .get(id)
            .map(|p| ProposalView::new(id, p, self.vote_count(id)))
    }

    /// Every proposal in id order.
    pub fn proposals(&self) -> Vec<ProposalView> {
        self.proposals
            .iter()
            .map(|(id, p)| ProposalView::new(id, p, self.vote_count(id)))
            .collect()
    }

    /// Proposals currently eligible to receive votes, in id order.
    pub fn approved_proposals(&self) -> Vec<ProposalId> {
        self.proposals.approved().collect()
    }

    /// Proposals awaiting review, in id order.
    pub fn pending_proposals(&self) -> Vec<ProposalId> {
        self.proposals.pending().collect()
    }

    pub fn vote_count(&self, id: ProposalId) -> u64 {
        self.ledger.count(&(), &id)
    }

    pub fn total_votes(&self) -> u64 {
        self.ledger.total(&())
    }

    /// The proposal `voter` voted for, if any.
    pub fn receipt(&self, voter: &Identity) -> Option<ProposalId> {
        self.ledger.receipt(&(), voter).copied()
    }

    /// The winning proposal once votes are tallied.
    ///
    /// Scans Completed proposals in id order and keeps the first strictly
    /// highest count, so ties resolve to the lowest id. `Ok(None)` means no
    /// proposal received a vote.
    pub fn winner(&self) -> Result<Option<ProposalId>, ElectionError> {
        if self.status != WorkflowStatus::VotesTallied {
            return Err(ElectionError::NotTalliedYet("voting session".into()));
        }
        let completed = self
            .proposals
            .iter()
            .filter(|(_, p)| p.voting_status == VotingStatus::Completed)
            .map(|(id, _)| id)
            .collect::<Vec<_>>();
        Ok(self.ledger.leader(&(), &completed).map(|(id, _)| id))
    }
}
