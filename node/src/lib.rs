//! Election authority node.
//!
//! Wraps either election engine in a single-writer task:
//! - Commands are applied one at a time in arrival order
//! - The clock is sampled once per command
//! - Reads run concurrently under a shared lock
//! - Every successful command's notification goes to the audit log and to
//!   async subscribers

pub mod audit;
pub mod authority;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod logging;
pub mod node;
pub mod shutdown;

pub use audit::{AuditEntry, AuditLog};
pub use authority::{Authority, AuthorityHandle};
pub use config::NodeConfig;
pub use engine::Ledger;
pub use error::NodeError;
pub use events::{EventBus, Listener};
pub use logging::{init_logging, init_logging_from, LogFormat};
pub use node::TallyNode;
pub use shutdown::{ShutdownController, ShutdownListener};
