//! Recurring expiry check for the active session.
//!
//! One worker thread per session store, spawned after login (or after a
//! rehydrated start) by the composition root. Each tick re-runs token
//! validation through [`SessionStore::revalidate_at`]; the loop exits as soon
//! as the session is `Empty`, whether that came from expiry, an explicit
//! logout (which signals the shutdown channel), or store disposal. The thread
//! must never outlive the session it watches.

use std::sync::{Arc, mpsc};
use std::thread;

use chrono::Utc;
use tracing::debug;

use crate::store::SessionStore;

/// Handle to control and join the expiry worker.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    /// Request graceful shutdown and wait for the worker to stop.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }

    /// True once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(|j| j.is_finished())
    }
}

/// Fixed-interval credential revalidation loop.
#[derive(Debug)]
pub struct ExpiryWorker;

impl ExpiryWorker {
    /// Spawn the worker thread for `store`, ticking at the store's configured
    /// expiry-check interval.
    ///
    /// The worker registers itself with the store so `logout()` can signal it
    /// directly instead of waiting out a full interval.
    pub fn spawn(store: Arc<SessionStore>) -> WorkerHandle {
        let interval = store.config().expiry_check_interval();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
        store.register_expiry_signal(shutdown_tx.clone());

        let join = thread::Builder::new()
            .name("session-expiry".to_string())
            .spawn(move || expiry_loop(store, shutdown_rx, interval))
            .expect("failed to spawn session expiry worker thread");

        WorkerHandle {
            shutdown: shutdown_tx,
            join: Some(join),
        }
    }
}

fn expiry_loop(
    store: Arc<SessionStore>,
    shutdown_rx: mpsc::Receiver<()>,
    interval: std::time::Duration,
) {
    loop {
        match shutdown_rx.recv_timeout(interval) {
            // Logout/disposal signalled, or every sender dropped.
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if !store.revalidate_at(Utc::now()) {
                    break;
                }
            }
        }
    }

    debug!("session expiry worker stopped");
}
