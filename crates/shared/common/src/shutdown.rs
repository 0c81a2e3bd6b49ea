//! Graceful shutdown handling.
//!
//! Provides signal handling and a broadcast handle so that every server in
//! the process stops accepting connections on the same signal.

use tokio::signal;
use tokio::sync::watch;

/// Wait for a shutdown signal (Ctrl-C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}

/// Sending half: fires the shutdown for every [`Shutdown`] clone.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

/// Receiving half, cloned into each server.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// Create a linked trigger/receiver pair.
    pub fn channel() -> (ShutdownTrigger, Shutdown) {
        let (tx, rx) = watch::channel(false);
        (ShutdownTrigger { tx }, Shutdown { rx })
    }

    /// Resolve once shutdown has been triggered (or the trigger dropped).
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}

impl ShutdownTrigger {
    /// Trigger shutdown.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn wait_resolves_for_every_clone_after_trigger() {
        let (trigger, shutdown) = Shutdown::channel();
        let first = tokio::spawn(shutdown.clone().wait());
        let second = tokio::spawn(shutdown.clone().wait());

        let early = tokio::time::timeout(Duration::from_millis(50), shutdown.clone().wait()).await;
        assert!(early.is_err(), "wait must not resolve before the trigger");
        trigger.trigger();

        tokio::time::timeout(Duration::from_secs(1), async {
            first.await.unwrap();
            second.await.unwrap();
        })
        .await
        .expect("receivers should observe the trigger");

        // Late subscribers see the stored value.
        tokio::time::timeout(Duration::from_secs(1), shutdown.wait())
            .await
            .expect("late waiter should resolve immediately");
    }

    #[tokio::test]
    async fn dropping_the_trigger_releases_waiters() {
        let (trigger, shutdown) = Shutdown::channel();
        let waiter = tokio::spawn(shutdown.wait());
        drop(trigger);

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
    }
}
