//! Notification records emitted by successful mutations.
//!
//! Every mutating operation that succeeds yields exactly one [`Notification`].
//! Delivery to observers (audit log, UI refresh) is the embedder's concern and
//! carries no guarantee.

use serde::{Deserialize, Serialize};

use crate::{ApprovalStatus, CandidateId, ElectionId, Identity, ProposalId, WorkflowStatus};

/// The scope a vote was counted in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteScope {
    /// The single global session of the fixed-workflow engine.
    Session { proposal: ProposalId },
    /// One election of the multi-election engine.
    Election {
        election: ElectionId,
        candidate: CandidateId,
    },
}

/// Kind, affected id, and new value of one state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    OwnershipTransferred {
        previous: Identity,
        owner: Identity,
    },
    AdminChanged {
        identity: Identity,
        is_admin: bool,
    },
    ParticipantRegistered {
        identity: Identity,
    },
    /// Profile rewritten; status is back to Pending.
    ParticipantUpdated {
        identity: Identity,
    },
    ParticipantStatusChanged {
        identity: Identity,
        status: ApprovalStatus,
    },
    ProposalRegistered {
        id: ProposalId,
    },
    /// Metadata rewritten; status is back to Pending.
    ProposalUpdated {
        id: ProposalId,
    },
    ProposalStatusChanged {
        id: ProposalId,
        status: ApprovalStatus,
    },
    WorkflowStatusChanged {
        previous: WorkflowStatus,
        current: WorkflowStatus,
    },
    ElectionCreated {
        id: ElectionId,
        creator: Identity,
    },
    /// Election redefined; counters and tally state were reset.
    ElectionUpdated {
        id: ElectionId,
    },
    ElectionActivityChanged {
        id: ElectionId,
        active: bool,
    },
    VoteCast {
        voter: Identity,
        scope: VoteScope,
    },
    ResultsTallied {
        id: ElectionId,
        winner: Option<CandidateId>,
        votes: u64,
    },
}

impl Notification {
    /// Short machine-readable kind, matching the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OwnershipTransferred { .. } => "ownership_transferred",
            Self::AdminChanged { .. } => "admin_changed",
            Self::ParticipantRegistered { .. } => "participant_registered",
            Self::ParticipantUpdated { .. } => "participant_updated",
            Self::ParticipantStatusChanged { .. } => "participant_status_changed",
            Self::ProposalRegistered { .. } => "proposal_registered",
            Self::ProposalUpdated { .. } => "proposal_updated",
            Self::ProposalStatusChanged { .. } => "proposal_status_changed",
            Self::WorkflowStatusChanged { .. } => "workflow_status_changed",
            Self::ElectionCreated { .. } => "election_created",
            Self::ElectionUpdated { .. } => "election_updated",
            Self::ElectionActivityChanged { .. } => "election_activity_changed",
            Self::VoteCast { .. } => "vote_cast",
            Self::ResultsTallied { .. } => "results_tallied",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_serialized_tag() {
        let events = vec![
            Notification::ProposalRegistered {
                id: ProposalId::FIRST,
            },
            Notification::WorkflowStatusChanged {
                previous: WorkflowStatus::RegisteringVoters,
                current: WorkflowStatus::ProposalsRegistrationStarted,
            },
            Notification::VoteCast {
                voter: Identity::new([7u8; 32]),
                scope: VoteScope::Election {
                    election: ElectionId::new("e1"),
                    candidate: CandidateId::new("c1"),
                },
            },
            Notification::ResultsTallied {
                id: ElectionId::new("e1"),
                winner: None,
                votes: 0,
            },
        ];
        for event in events {
            let json = serde_json::to_value(&event).expect("serializable");
            assert_eq!(json["kind"], event.kind());
        }
    }
}
