//! Stop signal for the authority loop.
//!
//! Stopping is a one-way latch held in a `tokio::sync::watch` channel. Once
//! raised it stays raised, so a listener polled late still sees it. The
//! authority finishes the command in hand, then answers everything still
//! queued with [`NodeError::ShuttingDown`](crate::NodeError::ShuttingDown).

use tokio::signal;
use tokio::sync::watch;

/// Owner side of the stop latch. Dropping it counts as a stop.
pub struct ShutdownController {
    tx: watch::Sender<bool>,
}

/// Authority side of the stop latch.
#[derive(Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Raise the latch. Repeated calls are no-ops.
    pub fn shutdown(&self) {
        if !self.tx.send_replace(true) {
            tracing::debug!("stop requested");
        }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait for SIGTERM or SIGINT, then raise the latch.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "SIGTERM handler unavailable");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        let signal = tokio::select! {
            _ = ctrl_c => "SIGINT",
            _ = terminate => "SIGTERM",
        };
        tracing::info!(signal, "stop signal received, draining authority");
        self.shutdown();
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownListener {
    /// Resolve once the latch is raised or its controller is gone.
    pub async fn stopped(&mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }

    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn listener_created_after_stop_still_sees_it() {
        let controller = ShutdownController::new();
        controller.shutdown();
        controller.shutdown();
        assert!(controller.is_shutdown());

        let mut late = controller.listener();
        assert!(late.is_stopped());
        tokio::time::timeout(Duration::from_secs(1), late.stopped())
            .await
            .expect("latched stop resolves immediately");
    }

    #[tokio::test]
    async fn every_listener_is_released() {
        let controller = ShutdownController::new();
        let mut first = controller.listener();
        let mut second = first.clone();
        assert!(!first.is_stopped());

        let waiter = tokio::spawn(async move { first.stopped().await });
        controller.shutdown();
        waiter.await.unwrap();
        second.stopped().await;
    }

    #[tokio::test]
    async fn dropping_the_controller_releases_listeners() {
        let controller = ShutdownController::new();
        let mut listener = controller.listener();
        drop(controller);
        tokio::time::timeout(Duration::from_secs(1), listener.stopped())
            .await
            .expect("orphaned listener resolves");
        assert!(!listener.is_stopped());
    }
}
