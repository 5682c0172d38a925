//! Serializable command set for submitting operations through a single writer.

use crate::engine::WorkflowEngine;
use crate::phase::Transition;
use serde::{Deserialize, Serialize};
use tally_types::{ApprovalStatus, ContentRef, ElectionError, Identity, Notification, ProposalId};

/// Every mutation of a [`WorkflowEngine`], as data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WorkflowCommand {
    TransferOwnership {
        new_owner: Identity,
    },
    SetAdmin {
        identity: Identity,
        is_admin: bool,
    },
    RegisterVoter {
        document: ContentRef,
        profile: ContentRef,
    },
    UpdateVoter {
        document: ContentRef,
        profile: ContentRef,
    },
    ReviewVoter {
        voter: Identity,
        status: ApprovalStatus,
    },
    RegisterProposal {
        name: String,
        document: ContentRef,
        profile: ContentRef,
    },
    UpdateProposal {
        id: ProposalId,
        name: String,
        document: ContentRef,
        profile: ContentRef,
    },
    ReviewProposal {
        id: ProposalId,
        status: ApprovalStatus,
    },
    Advance {
        transition: Transition,
    },
    Vote {
        proposal: ProposalId,
    },
}

impl WorkflowEngine {
    /// Dispatch `command` on behalf of `caller`.
    pub fn apply(
        &mut self,
        caller: &Identity,
        command: WorkflowCommand,
    ) -> Result<Notification, ElectionError> {
        match command {
            WorkflowCommand::TransferOwnership { new_owner } => {
                self.transfer_ownership(caller, new_owner)
            }
            WorkflowCommand::SetAdmin { identity, is_admin } => {
                self.set_admin(caller, identity, is_admin)
            }
            WorkflowCommand::RegisterVoter { document, profile } => {
                self.register_voter(caller, document, profile)
            }
            WorkflowCommand::UpdateVoter { document, profile } => {
                self.update_voter(caller, document, profile)
            }
            WorkflowCommand::ReviewVoter { voter, status } => {
                self.review_voter(caller, &voter, status)
            }
            WorkflowCommand::RegisterProposal {
                name,
                document,
                profile,
            } => self.register_proposal(caller, name, document, profile),
            WorkflowCommand::UpdateProposal {
                id,
                name,
                document,
                profile,
            } => self.update_proposal(caller, id, name, document, profile),
            WorkflowCommand::ReviewProposal { id, status } => {
                self.review_proposal(caller, id, status)
            }
            WorkflowCommand::Advance { transition } => self.advance(caller, transition),
            WorkflowCommand::Vote { proposal } => self.vote(caller, proposal),
        }
    }
}
