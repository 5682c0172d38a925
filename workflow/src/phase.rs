//! The phase state machine.

use serde::{Deserialize, Serialize};
use tally_types::{ElectionError, WorkflowStatus};

/// A requested phase change. Each one has exactly one legal predecessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    StartProposalsRegistration,
    EndProposalsRegistration,
    StartVotingSession,
    EndVotingSession,
    TallyVotes,
}

impl Transition {
    pub const ALL: [Transition; 5] = [
        Self::StartProposalsRegistration,
        Self::EndProposalsRegistration,
        Self::StartVotingSession,
        Self::EndVotingSession,
        Self::TallyVotes,
    ];

    /// The only state this transition may leave from.
    pub fn predecessor(&self) -> WorkflowStatus {
        match self {
            Self::StartProposalsRegistration => WorkflowStatus::RegisteringVoters,
            Self::EndProposalsRegistration => WorkflowStatus::ProposalsRegistrationStarted,
            Self::StartVotingSession => WorkflowStatus::ProposalsRegistrationEnded,
            Self::EndVotingSession => WorkflowStatus::VotingSessionStarted,
            Self::TallyVotes => WorkflowStatus::VotingSessionEnded,
        }
    }

    /// The state this transition arrives at.
    pub fn target(&self) -> WorkflowStatus {
        match self {
            Self::StartProposalsRegistration => WorkflowStatus::ProposalsRegistrationStarted,
            Self::EndProposalsRegistration => WorkflowStatus::ProposalsRegistrationEnded,
            Self::StartVotingSession => WorkflowStatus::VotingSessionStarted,
            Self::EndVotingSession => WorkflowStatus::VotingSessionEnded,
            Self::TallyVotes => WorkflowStatus::VotesTallied,
        }
    }
}

/// Apply `transition` to `current`.
///
/// Fails with `InvalidPhase` unless `current` is the transition's single legal
/// predecessor, so states can be neither skipped nor revisited.
pub fn next(current: WorkflowStatus, transition: Transition) -> Result<WorkflowStatus, ElectionError> {
    require(current, transition.predecessor())?;
    Ok(transition.target())
}

/// Gate an operation on the cursor being exactly `expected`.
pub fn require(current: WorkflowStatus, expected: WorkflowStatus) -> Result<(), ElectionError> {
    if current == expected {
        Ok(())
    } else {
        Err(ElectionError::InvalidPhase {
            expected,
            actual: current,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_transition_steps_to_the_successor() {
        for transition in Transition::ALL {
            assert_eq!(transition.predecessor().successor(), Some(transition.target()));
        }
    }

    #[test]
    fn full_walk_reaches_votes_tallied() {
        let mut status = WorkflowStatus::default();
        for transition in Transition::ALL {
            status = next(status, transition).unwrap();
        }
        assert_eq!(status, WorkflowStatus::VotesTallied);
    }

    #[test]
    fn skipping_is_invalid_phase() {
        let err = next(WorkflowStatus::RegisteringVoters, Transition::StartVotingSession)
            .unwrap_err();
        assert_eq!(
            err,
            ElectionError::InvalidPhase {
                expected: WorkflowStatus::ProposalsRegistrationEnded,
                actual: WorkflowStatus::RegisteringVoters,
            }
        );
    }

    #[test]
    fn nothing_leaves_the_terminal_state() {
        for transition in Transition::ALL {
            assert!(next(WorkflowStatus::VotesTallied, transition).is_err());
        }
    }
}
