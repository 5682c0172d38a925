//! Multi-election engine.
//!
//! Many elections, each with its own schedule, candidate set and tally, run
//! side by side under one registry. An election is votable while
//! `active && start <= now <= end`, recomputed on every call. It may be
//! redefined only before it starts, and tallied exactly once after it ends.
//!
//! Unlike the fixed workflow there is no per-voter or per-candidate approval
//! gate: any registered user may vote once per election for any of its
//! candidates.

pub mod command;
pub mod election;
pub mod engine;
pub mod scheduler;
pub mod view;

pub use command::ElectionCommand;
pub use election::{Election, ElectionSpec};
pub use engine::ElectionsEngine;
pub use scheduler::ElectionScheduler;
pub use view::{CandidateTally, ElectionView};
