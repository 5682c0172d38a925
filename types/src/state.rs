//! Status enums for participants, ballot items, and the global workflow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Review state of a participant or ballot item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    /// Awaiting review. Every registration and every update lands here.
    #[default]
    Pending,
    /// Cleared to act (participant) or to receive votes (ballot item).
    Approved,
    /// Refused by an admin. May be approved again later.
    Rejected,
}

impl ApprovalStatus {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Whether a proposal belongs to a tallied voting session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VotingStatus {
    #[default]
    Pending,
    /// The proposal was Approved when votes were tallied.
    Completed,
}

/// The global phase cursor of the fixed-workflow engine.
///
/// Variants are declared in lifecycle order, so the derived `Ord` follows the
/// only legal direction of travel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WorkflowStatus {
    #[default]
    RegisteringVoters,
    ProposalsRegistrationStarted,
    ProposalsRegistrationEnded,
    VotingSessionStarted,
    VotingSessionEnded,
    VotesTallied,
}

impl WorkflowStatus {
    /// All states in lifecycle order.
    pub const ALL: [WorkflowStatus; 6] = [
        Self::RegisteringVoters,
        Self::ProposalsRegistrationStarted,
        Self::ProposalsRegistrationEnded,
        Self::VotingSessionStarted,
        Self::VotingSessionEnded,
        Self::VotesTallied,
    ];

    /// The state that legally follows this one, or `None` at the terminal state.
    pub fn successor(&self) -> Option<WorkflowStatus> {
        match self {
            Self::RegisteringVoters => Some(Self::ProposalsRegistrationStarted),
            Self::ProposalsRegistrationStarted => Some(Self::ProposalsRegistrationEnded),
            Self::ProposalsRegistrationEnded => Some(Self::VotingSessionStarted),
            Self::VotingSessionStarted => Some(Self::VotingSessionEnded),
            Self::VotingSessionEnded => Some(Self::VotesTallied),
            Self::VotesTallied => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.successor().is_none()
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RegisteringVoters => "registering voters",
            Self::ProposalsRegistrationStarted => "proposals registration started",
            Self::ProposalsRegistrationEnded => "proposals registration ended",
            Self::VotingSessionStarted => "voting session started",
            Self::VotingSessionEnded => "voting session ended",
            Self::VotesTallied => "votes tallied",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successor_chain_visits_every_state_once() {
        let mut visited = vec![WorkflowStatus::default()];
        while let Some(next) = visited.last().and_then(|s| s.successor()) {
            visited.push(next);
        }
        assert_eq!(visited, WorkflowStatus::ALL.to_vec());
    }

    #[test]
    fn only_votes_tallied_is_terminal() {
        for status in WorkflowStatus::ALL {
            assert_eq!(status.is_terminal(), status == WorkflowStatus::VotesTallied);
        }
    }

    #[test]
    fn new_records_start_pending() {
        assert_eq!(ApprovalStatus::default(), ApprovalStatus::Pending);
        assert_eq!(VotingStatus::default(), VotingStatus::Pending);
    }
}
