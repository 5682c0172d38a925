//! Vote ledger shared by both election engines.
//!
//! The ledger is the single point where double voting is prevented. A scope is
//! the unit a vote is counted in: the whole session for the fixed-workflow
//! engine (`S = ()`), one election for the multi-election engine. Within a
//! scope every identity holds at most one receipt, and
//! `sum(counts) == total` holds after every operation.

pub mod ledger;
pub mod tally;

pub use ledger::VoteLedger;
pub use tally::{leader, ScopeTally};
