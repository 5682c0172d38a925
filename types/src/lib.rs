//! Fundamental types for the tally election engines.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! caller identities, content references, timestamps, identifiers, status enums,
//! the error taxonomy, and the notification record emitted by every mutation.

pub mod content;
pub mod error;
pub mod event;
pub mod identity;
pub mod ids;
pub mod state;
pub mod time;

pub use content::ContentRef;
pub use error::ElectionError;
pub use event::{Notification, VoteScope};
pub use identity::Identity;
pub use ids::{CandidateId, ElectionId, ProposalId};
pub use state::{ApprovalStatus, VotingStatus, WorkflowStatus};
pub use time::{Clock, SystemClock, Timestamp};
