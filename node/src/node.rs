//! Node assembly: config in, running authority out.

use std::sync::Arc;

use tokio::task::JoinHandle;

use tally_types::Clock;

use crate::audit::AuditLog;
use crate::authority::{Authority, AuthorityHandle};
use crate::config::NodeConfig;
use crate::engine::Ledger;
use crate::events::EventBus;
use crate::shutdown::ShutdownController;
use crate::NodeError;

/// A running election node around one engine.
pub struct TallyNode<E: Ledger> {
    config: NodeConfig,
    handle: AuthorityHandle<E>,
    shutdown: ShutdownController,
    task: JoinHandle<()>,
}

impl<E: Ledger> TallyNode<E> {
    /// Validate `config`, build the engine for its owner, open the audit log,
    /// spawn the authority, and install the configured admins through the
    /// owner's normal `set_admin` path.
    pub async fn start(config: NodeConfig, clock: Arc<dyn Clock>) -> Result<Self, NodeError> {
        Self::start_with_events(config, clock, EventBus::new()).await
    }

    /// As [`start`](Self::start), with extra synchronous listeners.
    pub async fn start_with_events(
        config: NodeConfig,
        clock: Arc<dyn Clock>,
        mut events: EventBus,
    ) -> Result<Self, NodeError> {
        config.validate()?;
        let owner = config.owner_identity()?;
        let admins = config.admin_identities()?;
        let engine = E::create(owner)?;

        if let Some(path) = &config.audit_log {
            let audit = Arc::new(AuditLog::open(path)?);
            events.subscribe(audit.listener());
        }

        let shutdown = ShutdownController::new();
        let (authority, handle) = Authority::new(
            engine,
            clock,
            events,
            config.command_queue_capacity,
            config.event_channel_capacity,
            shutdown.listener(),
        );
        let task = tokio::spawn(authority.run());

        for admin in &admins {
            handle.submit(owner, E::grant_admin(*admin)).await?;
        }
        tracing::info!(owner = %owner, admins = admins.len(), "node started");

        Ok(Self {
            config,
            handle,
            shutdown,
            task,
        })
    }

    pub fn handle(&self) -> AuthorityHandle<E> {
        self.handle.clone()
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Stop the authority and wait for it to drain.
    pub async fn stop(self) -> Result<(), NodeError> {
        self.shutdown.shutdown();
        self.task
            .await
            .map_err(|e| NodeError::Task(e.to_string()))?;
        tracing::info!("node stopped");
        Ok(())
    }

    /// Run until SIGINT/SIGTERM, then stop.
    pub async fn run_until_signal(self) -> Result<(), NodeError> {
        self.shutdown.wait_for_signal().await;
        self.stop().await
    }
}
