//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tally_types::Identity;

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for an election node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Hex identity of the initial owner. Must be set and non-null.
    #[serde(default)]
    pub owner: String,

    /// Hex identities granted admin by the owner at start-up.
    #[serde(default)]
    pub admins: Vec<String>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Bound on commands waiting for the authority.
    #[serde(default = "default_command_queue_capacity")]
    pub command_queue_capacity: usize,

    /// Notifications buffered per async subscriber before it lags.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,

    /// Append-only JSON-lines audit file. Disabled when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<PathBuf>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_command_queue_capacity() -> usize {
    1024
}

fn default_event_channel_capacity() -> usize {
    256
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Config for a given owner with every other field at its default.
    pub fn for_owner(owner: Identity) -> Self {
        Self {
            owner: owner.to_string(),
            ..Self::default()
        }
    }

    pub fn owner_identity(&self) -> Result<Identity, NodeError> {
        if self.owner.trim().is_empty() {
            return Err(NodeError::Config("owner is not set".into()));
        }
        let owner: Identity = self
            .owner
            .parse()
            .map_err(|e| NodeError::Config(format!("owner: {e}")))?;
        if owner.is_null() {
            return Err(NodeError::Config("owner cannot be the null identity".into()));
        }
        Ok(owner)
    }

    pub fn admin_identities(&self) -> Result<Vec<Identity>, NodeError> {
        self.admins
            .iter()
            .map(|raw| {
                raw.parse::<Identity>()
                    .map_err(|e| NodeError::Config(format!("admins: {e}")))
            })
            .collect()
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }

    /// Check every field that can be wrong without touching the filesystem.
    pub fn validate(&self) -> Result<(), NodeError> {
        self.owner_identity()?;
        self.admin_identities()?;
        self.log_format()?;
        if self.command_queue_capacity == 0 {
            return Err(NodeError::Config("command_queue_capacity must be positive".into()));
        }
        if self.event_channel_capacity == 0 {
            return Err(NodeError::Config("event_channel_capacity must be positive".into()));
        }
        Ok(())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            admins: Vec::new(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            command_queue_capacity: default_command_queue_capacity(),
            event_channel_capacity: default_event_channel_capacity(),
            audit_log: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Identity {
        Identity::new([7u8; 32])
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = NodeConfig::for_owner(owner());
        config.audit_log = Some(PathBuf::from("/var/log/tally/audit.jsonl"));
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = NodeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NodeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.command_queue_capacity, 1024);
        assert_eq!(config.event_channel_capacity, 256);
        assert_eq!(config.log_format, "human");
        assert!(config.audit_log.is_none());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = format!(
            r#"
            owner = "{}"
            admins = ["{}"]
            log_format = "json"
            command_queue_capacity = 8
        "#,
            owner(),
            Identity::new([8u8; 32])
        );
        let config = NodeConfig::from_toml_str(&toml).expect("should parse");
        assert_eq!(config.owner_identity().unwrap(), owner());
        assert_eq!(config.admin_identities().unwrap(), vec![Identity::new([8u8; 32])]);
        assert_eq!(config.log_format().unwrap(), LogFormat::Json);
        assert_eq!(config.command_queue_capacity, 8);
        assert_eq!(config.log_level, "info"); // default
        assert!(config.validate().is_ok());
    }

    #[test]
    fn owner_is_required_and_non_null() {
        let config = NodeConfig::default();
        assert!(matches!(config.owner_identity(), Err(NodeError::Config(_))));

        let config = NodeConfig::for_owner(Identity::NULL);
        assert!(matches!(config.validate(), Err(NodeError::Config(_))));

        let mut config = NodeConfig::for_owner(owner());
        config.owner = "zz".into();
        assert!(matches!(config.owner_identity(), Err(NodeError::Config(_))));
    }

    #[test]
    fn zero_capacities_are_rejected() {
        let mut config = NodeConfig::for_owner(owner());
        config.event_channel_capacity = 0;
        assert!(matches!(config.validate(), Err(NodeError::Config(_))));
    }

    proptest::proptest! {
        #[test]
        fn tuning_fields_survive_toml(
            queue in 1usize..1_000_000,
            events in 1usize..1_000_000,
            level in "(trace|debug|info|warn|error)",
        ) {
            let mut config = NodeConfig::for_owner(owner());
            config.command_queue_capacity = queue;
            config.event_channel_capacity = events;
            config.log_level = level;
            let parsed = NodeConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
            proptest::prop_assert_eq!(parsed, config);
        }
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NodeConfig::from_toml_file("/nonexistent/tally.toml");
        assert!(matches!(result, Err(NodeError::Config(_))));
    }
}
