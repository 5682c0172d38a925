//! Error taxonomy shared by every engine crate.
//!
//! Every failure is synchronous and leaves the state untouched; retrying with
//! the same arguments is safe once the precondition has been fixed.

use thiserror::Error;

use crate::WorkflowStatus;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ElectionError {
    #[error("caller {0} is not authorized for this operation")]
    Unauthorized(String),

    #[error("operation requires phase {expected}, current phase is {actual}")]
    InvalidPhase {
        expected: WorkflowStatus,
        actual: WorkflowStatus,
    },

    #[error("election {0} is not open for voting")]
    NotVotable(String),

    #[error("{0} is already registered")]
    AlreadyRegistered(String),

    #[error("{0} has already voted in this scope")]
    AlreadyVoted(String),

    #[error("results for {0} are already tallied")]
    AlreadyTallied(String),

    #[error("{0} is not registered")]
    NotRegistered(String),

    #[error("no eligible ballot item {0}")]
    InvalidTarget(String),

    #[error("{0} is not approved")]
    NotApproved(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid time range: start {start}, end {end}, now {now}")]
    InvalidTimeRange { start: u64, end: u64, now: u64 },

    #[error("identifier {0} is already in use")]
    DuplicateId(String),

    #[error("election {0} has already started")]
    AlreadyStarted(String),

    #[error("too early: {0}")]
    TooEarly(String),

    #[error("results for {0} are not tallied yet")]
    NotTalliedYet(String),
}
