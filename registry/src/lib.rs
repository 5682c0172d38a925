//! Registration and approval lifecycle for participants and proposals.
//!
//! Records are created once and never deleted. Any profile or metadata change
//! resets the record to Pending so it has to be reviewed again. Phase and
//! privilege gates are the engine's job; the registries only enforce their own
//! data invariants.

pub mod index;
pub mod participant;
pub mod proposal;

pub use index::ReviewIndex;
pub use participant::{Participant, ParticipantRegistry};
pub use proposal::{Proposal, ProposalRegistry};
