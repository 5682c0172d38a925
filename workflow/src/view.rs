//! Read-side view of a proposal with its ledger counter attached.

use serde::{Deserialize, Serialize};
use tally_registry::Proposal;
use tally_types::{ApprovalStatus, ContentRef, ProposalId, VotingStatus};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalView {
    pub id: ProposalId,
    pub name: String,
    pub document: ContentRef,
    pub profile: ContentRef,
    pub approval: ApprovalStatus,
    pub voting_status: VotingStatus,
    pub vote_count: u64,
}

impl ProposalView {
    pub(crate) fn new(id: ProposalId, proposal: &Proposal, vote_count: u64) -> Self {
        Self {
            id,
            name: proposal.name.clone(),
            document: proposal.document.clone(),
            profile: proposal.profile.clone(),
            approval: proposal.approval,
            voting_status: proposal.voting_status,
            vote_count,
        }
    }
}
