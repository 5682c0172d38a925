//! Fixed-workflow election engine.
//!
//! A single global session moves through
//! `RegisteringVoters → ProposalsRegistrationStarted → ProposalsRegistrationEnded
//! → VotingSessionStarted → VotingSessionEnded → VotesTallied`, with separate
//! approval gates for voters and proposals. The phase cursor only moves forward,
//! one step at a time, through [`phase::next`].

pub mod command;
pub mod engine;
pub mod phase;
pub mod view;

pub use command::WorkflowCommand;
pub use engine::WorkflowEngine;
pub use phase::Transition;
pub use view::ProposalView;
