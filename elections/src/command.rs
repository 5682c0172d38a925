//! Serializable command set for the multi-election engine.

use crate::election::ElectionSpec;
use crate::engine::ElectionsEngine;
use serde::{Deserialize, Serialize};
use tally_types::{
    ApprovalStatus, CandidateId, ContentRef, ElectionError, ElectionId, Identity, Notification,
    Timestamp,
};

/// Every mutation of an [`ElectionsEngine`], as data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ElectionCommand {
    TransferOwnership {
        new_owner: Identity,
    },
    SetAdmin {
        identity: Identity,
        is_admin: bool,
    },
    RegisterUser {
        document: ContentRef,
        profile: ContentRef,
    },
    UpdateUser {
        document: ContentRef,
        profile: ContentRef,
    },
    ReviewUser {
        user: Identity,
        status: ApprovalStatus,
    },
    CreateElection {
        id: ElectionId,
        spec: ElectionSpec,
    },
    UpdateElection {
        id: ElectionId,
        spec: ElectionSpec,
    },
    SetElectionActive {
        id: ElectionId,
        active: bool,
    },
    Vote {
        election: ElectionId,
        candidate: CandidateId,
    },
    Tally {
        id: ElectionId,
    },
}

impl ElectionsEngine {
    /// Dispatch `command` on behalf of `caller` at `now`.
    pub fn apply(
        &mut self,
        caller: &Identity,
        command: ElectionCommand,
        now: Timestamp,
    ) -> Result<Notification, ElectionError> {
        match command {
            ElectionCommand::TransferOwnership { new_owner } => {
                self.transfer_ownership(caller, new_owner)
            }
            ElectionCommand::SetAdmin { identity, is_admin } => {
                self.set_admin(caller, identity, is_admin)
            }
            ElectionCommand::RegisterUser { document, profile } => {
                self.register_user(caller, document, profile)
            }
            ElectionCommand::UpdateUser { document, profile } => {
                self.update_user(caller, document, profile)
            }
            ElectionCommand::ReviewUser { user, status } => self.review_user(caller, &user, status),
            ElectionCommand::CreateElection { id, spec } => {
                self.create_election(caller, id, spec, now)
            }
            ElectionCommand::UpdateElection { id, spec } => {
                self.update_election(caller, &id, spec, now)
            }
            ElectionCommand::SetElectionActive { id, active } => {
                self.set_election_active(caller, &id, active)
            }
            ElectionCommand::Vote {
                election,
                candidate,
            } => self.vote(caller, &election, candidate, now),
            ElectionCommand::Tally { id } => self.tally(caller, &id, now),
        }
    }
}
