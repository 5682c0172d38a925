//! The configured log level drives the global subscriber.
//!
//! Kept in its own test binary: a process gets exactly one global subscriber.

use tally_node::{init_logging_from, NodeConfig, NodeError};
use tally_types::Identity;
use tracing::Level;

#[test]
fn configured_level_reaches_the_global_subscriber() {
    std::env::remove_var("RUST_LOG");

    let owner = Identity::new([1; 32]);
    let toml = format!("owner = \"{owner}\"\nlog_format = \"xml\"\nlog_level = \"debug\"\n");
    let mut config = NodeConfig::from_toml_str(&toml).unwrap();
    assert!(matches!(
        init_logging_from(&config),
        Err(NodeError::Config(_))
    ));

    config.log_format = "json".into();
    assert!(init_logging_from(&config).unwrap());
    assert!(tracing::enabled!(Level::INFO));
    assert!(tracing::enabled!(Level::DEBUG));
    assert!(!tracing::enabled!(Level::TRACE));

    // The subscriber is already in place; a second config cannot replace it.
    config.log_level = "trace".into();
    assert!(!init_logging_from(&config).unwrap());
    assert!(!tracing::enabled!(Level::TRACE));
}
