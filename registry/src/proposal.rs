//! Proposal registry for the fixed-workflow engine.
//!
//! Proposals get sequential ids starting at 1. Ids are never reused.

use crate::index::ReviewIndex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tally_types::{
    ApprovalStatus, ContentRef, ElectionError, Notification, ProposalId, VotingStatus,
};

/// A proposal's metadata and review state. Vote counts live in the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub name: String,
    pub document: ContentRef,
    pub profile: ContentRef,
    pub approval: ApprovalStatus,
    pub voting_status: VotingStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalRegistry {
    proposals: BTreeMap<ProposalId, Proposal>,
    next_id: ProposalId,
    review: ReviewIndex<ProposalId>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self {
            proposals: BTreeMap::new(),
            next_id: ProposalId::FIRST,
            review: ReviewIndex::new(),
        }
    }

    /// Register a proposal under the next sequential id, status Pending.
    pub fn register(
        &mut self,
        name: String,
        document: ContentRef,
        profile: ContentRef,
    ) -> Result<Notification, ElectionError> {
        if name.trim().is_empty() {
            return Err(ElectionError::InvalidArgument(
                "proposal name cannot be empty".into(),
            ));
        }
        let id = self.next_id;
        self.next_id = id.next();
        self.proposals.insert(
            id,
            Proposal {
                name,
                document,
                profile,
                approval: ApprovalStatus::Pending,
                voting_status: VotingStatus::Pending,
            },
        );
        self.review.track(&id, None, ApprovalStatus::Pending);
        tracing::debug!(proposal = %id, "proposal registered");
        Ok(Notification::ProposalRegistered { id })
    }

    /// Rewrite every metadata field and send the proposal back to review.
    pub fn update(
        &mut self,
        id: ProposalId,
        name: String,
        document: ContentRef,
        profile: ContentRef,
    ) -> Result<Notification, ElectionError> {
        if name.trim().is_empty() {
            return Err(ElectionError::InvalidArgument(
                "proposal name cannot be empty".into(),
            ));
        }
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or_else(|| ElectionError::InvalidTarget(id.to_string()))?;
        let old = proposal.approval;
        proposal.name = name;
        proposal.document = document;
        proposal.profile = profile;
        proposal.approval = ApprovalStatus::Pending;
        self.review.track(&id, Some(old), ApprovalStatus::Pending);
        tracing::debug!(proposal = %id, "proposal updated, back to review");
        Ok(Notification::ProposalUpdated { id })
    }

    pub fn set_status(
        &mut self,
        id: ProposalId,
        status: ApprovalStatus,
    ) -> Result<Notification, ElectionError> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or_else(|| ElectionError::InvalidTarget(id.to_string()))?;
        let old = std::mem::replace(&mut proposal.approval, status);
        self.review.track(&id, Some(old), status);
        tracing::debug!(proposal = %id, ?status, "proposal status set");
        Ok(Notification::ProposalStatusChanged { id, status })
    }

    /// Mark every currently Approved proposal as Completed. Returns how many.
    pub fn complete_approved(&mut self) -> usize {
        let mut completed = 0;
        for id in self.review.approved() {
            if let Some(proposal) = self.proposals.get_mut(id) {
                proposal.voting_status = VotingStatus::Completed;
                completed += 1;
            }
        }
        completed
    }

    pub fn get(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&id)
    }

    pub fn is_approved(&self, id: ProposalId) -> bool {
        self.review.is_approved(&id)
    }

    /// All proposals in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ProposalId, &Proposal)> {
        self.proposals.iter().map(|(id, p)| (*id, p))
    }

    pub fn approved(&self) -> impl Iterator<Item = ProposalId> + '_ {
        self.review.approved().copied()
    }

    pub fn pending(&self) -> impl Iterator<Item = ProposalId> + '_ {
        self.review.pending().copied()
    }

    /// The id the next registration will receive.
    pub fn next_id(&self) -> ProposalId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

impl Default for ProposalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_proposals(names: &[&str]) -> ProposalRegistry {
        let mut registry = ProposalRegistry::new();
        for name in names {
            registry
                .register(name.to_string(), "doc".into(), "profile".into())
                .unwrap();
        }
        registry
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let registry = with_proposals(&["a", "b", "c"]);
        let ids: Vec<u64> = registry.iter().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(registry.next_id(), ProposalId::new(4));
    }

    #[test]
    fn empty_name_is_rejected_without_consuming_an_id() {
        let mut registry = ProposalRegistry::new();
        let err = registry
            .register("  ".into(), "doc".into(), "profile".into())
            .unwrap_err();
        assert!(matches!(err, ElectionError::InvalidArgument(_)));
        assert_eq!(registry.next_id(), ProposalId::FIRST);
    }

    #[test]
    fn update_rewrites_fields_and_resets_review() {
        let mut registry = with_proposals(&["a"]);
        let id = ProposalId::FIRST;
        registry.set_status(id, ApprovalStatus::Approved).unwrap();
        registry
            .update(id, "renamed".into(), "doc2".into(), "p2".into())
            .unwrap();
        let proposal = registry.get(id).unwrap();
        assert_eq!(proposal.name, "renamed");
        assert_eq!(proposal.approval, ApprovalStatus::Pending);
        assert!(!registry.is_approved(id));
    }

    #[test]
    fn unknown_id_is_invalid_target() {
        let mut registry = with_proposals(&["a"]);
        assert!(matches!(
            registry.set_status(ProposalId::new(7), ApprovalStatus::Approved),
            Err(ElectionError::InvalidTarget(_))
        ));
    }

    #[test]
    fn complete_approved_leaves_others_pending() {
        let mut registry = with_proposals(&["a", "b", "c"]);
        registry
            .set_status(ProposalId::new(1), ApprovalStatus::Approved)
            .unwrap();
        registry
            .set_status(ProposalId::new(3), ApprovalStatus::Rejected)
            .unwrap();
        assert_eq!(registry.complete_approved(), 1);
        let statuses: Vec<VotingStatus> =
            registry.iter().map(|(_, p)| p.voting_status).collect();
        assert_eq!(
            statuses,
            vec![
                VotingStatus::Completed,
                VotingStatus::Pending,
                VotingStatus::Pending
            ]
        );
    }
}
