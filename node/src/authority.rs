//! Single-writer authority: one task owns the engine and applies commands in
//! arrival order.
//!
//! Mutations travel over a bounded `mpsc` queue with a `oneshot` reply, so the
//! engine sees a total order of whole operations. Reads take the shared lock
//! and run concurrently with each other, never observing a half-applied
//! command.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, RwLock};

use tally_types::{Clock, Identity, Notification};

use crate::engine::Ledger;
use crate::events::EventBus;
use crate::shutdown::ShutdownListener;
use crate::NodeError;

struct Request<C> {
    caller: Identity,
    command: C,
    reply: oneshot::Sender<Result<Notification, NodeError>>,
}

/// The task side. Consume with [`Authority::run`].
pub struct Authority<E: Ledger> {
    engine: Arc<RwLock<E>>,
    requests: mpsc::Receiver<Request<E::Command>>,
    clock: Arc<dyn Clock>,
    events: EventBus,
    notifications: broadcast::Sender<Notification>,
    shutdown: ShutdownListener,
}

/// Cloneable submission and read access to a running [`Authority`].
pub struct AuthorityHandle<E: Ledger> {
    engine: Arc<RwLock<E>>,
    requests: mpsc::Sender<Request<E::Command>>,
    notifications: broadcast::Sender<Notification>,
}

impl<E: Ledger> Clone for AuthorityHandle<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            requests: self.requests.clone(),
            notifications: self.notifications.clone(),
        }
    }
}

impl<E: Ledger> Authority<E> {
    /// Build the task and its handle. Capacities are clamped to at least 1.
    pub fn new(
        engine: E,
        clock: Arc<dyn Clock>,
        events: EventBus,
        queue_capacity: usize,
        event_capacity: usize,
        shutdown: ShutdownListener,
    ) -> (Self, AuthorityHandle<E>) {
        let engine = Arc::new(RwLock::new(engine));
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let (notifications, _) = broadcast::channel(event_capacity.max(1));
        let handle = AuthorityHandle {
            engine: Arc::clone(&engine),
            requests: tx,
            notifications: notifications.clone(),
        };
        let authority = Self {
            engine,
            requests: rx,
            clock,
            events,
            notifications,
            shutdown,
        };
        (authority, handle)
    }

    /// Apply commands until shutdown or until every handle is dropped.
    ///
    /// A command already being applied completes; commands still queued when
    /// shutdown arrives are answered with [`NodeError::ShuttingDown`].
    pub async fn run(mut self) {
        tracing::info!("authority started");
        loop {
            let request = tokio::select! {
                biased;
                _ = self.shutdown.stopped() => {
                    tracing::info!("authority shutting down");
                    break;
                }
                request = self.requests.recv() => match request {
                    Some(request) => request,
                    None => {
                        tracing::info!("all handles dropped, authority stopping");
                        break;
                    }
                },
            };
            let outcome = self.execute(request.caller, request.command).await;
            // The submitter may have given up waiting.
            let _ = request.reply.send(outcome);
        }

        self.requests.close();
        let mut rejected = 0usize;
        while let Ok(request) = self.requests.try_recv() {
            let _ = request.reply.send(Err(NodeError::ShuttingDown));
            rejected += 1;
        }
        if rejected > 0 {
            tracing::warn!(rejected, "queued commands rejected at shutdown");
        }
    }

    async fn execute(
        &mut self,
        caller: Identity,
        command: E::Command,
    ) -> Result<Notification, NodeError> {
        let now = self.clock.now();
        tracing::debug!(caller = %caller, ?command, %now, "applying command");
        let result = {
            let mut engine = self.engine.write().await;
            engine.apply(&caller, command, now)
        };
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(caller = %caller, error = %e, "command rejected");
                return Err(e.into());
            }
        };
        self.events.emit(now, &event);
        // No subscribers is fine.
        let _ = self.notifications.send(event.clone());
        Ok(event)
    }
}

impl<E: Ledger> AuthorityHandle<E> {
    /// Queue `command` for `caller` and wait for its outcome.
    pub async fn submit(
        &self,
        caller: Identity,
        command: E::Command,
    ) -> Result<Notification, NodeError> {
        let (reply, outcome) = oneshot::channel();
        self.requests
            .send(Request {
                caller,
                command,
                reply,
            })
            .await
            .map_err(|_| NodeError::ShuttingDown)?;
        outcome.await.map_err(|_| NodeError::ChannelClosed)?
    }

    /// Run `f` against the current engine state under the shared lock.
    pub async fn read<R>(&self, f: impl FnOnce(&E) -> R) -> R {
        let engine = self.engine.read().await;
        f(&engine)
    }

    /// Receive every notification published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }
}
