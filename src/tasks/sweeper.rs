//! TTL Sweeper Task
//!
//! Background task that periodically removes expired entries from every
//! namespace and feeds the removals into the eviction counter.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::CacheState;

// == Sweeper State ==
/// Lifecycle of the sweeper. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// Ticking and sweeping
    Running,
    /// Stop requested, task not yet exited
    Stopping,
    /// Task has exited
    Stopped,
}

impl fmt::Display for SweeperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SweeperState::Running => "running",
            SweeperState::Stopping => "stopping",
            SweeperState::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

// == Sweeper ==
/// Owned handle to the background sweep task.
///
/// Dropping the handle cancels the task, so short-lived services do not leak
/// it even when [`Sweeper::stop`] is never called.
#[derive(Debug)]
pub struct Sweeper {
    token: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
    state_tx: Arc<watch::Sender<SweeperState>>,
    state_rx: watch::Receiver<SweeperState>,
}

impl Sweeper {
    /// Spawns the sweep loop on the current Tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub(crate) fn spawn(state: Arc<RwLock<CacheState>>, interval: Duration) -> Self {
        let token = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(SweeperState::Running);
        let state_tx = Arc::new(state_tx);

        let handle = tokio::spawn(run(state, interval, token.clone(), state_tx.clone()));

        Self {
            token,
            handle: Mutex::new(Some(handle)),
            state_tx,
            state_rx,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SweeperState {
        *self.state_rx.borrow()
    }

    /// Stops the task and waits for it to exit.
    ///
    /// Calling this again after the task has stopped is a no-op.
    pub async fn stop(&self) {
        let Some(handle) = self.handle.lock().await.take() else {
            debug!("Sweeper already stopped");
            return;
        };

        self.state_tx.send_if_modified(|state| {
            if *state == SweeperState::Running {
                *state = SweeperState::Stopping;
                true
            } else {
                false
            }
        });
        self.token.cancel();

        if let Err(e) = handle.await {
            warn!("Sweeper task ended abnormally: {}", e);
        }
        // The task publishes Stopped itself, unless it panicked first.
        self.state_tx.send_replace(SweeperState::Stopped);
        info!("Sweeper stopped");
    }

    /// Resolves once the task has exited.
    pub async fn stopped(&self) {
        let mut rx = self.state_rx.clone();
        // Err only if every sender is gone, which also means the task is gone.
        let _ = rx.wait_for(|state| *state == SweeperState::Stopped).await;
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run(
    state: Arc<RwLock<CacheState>>,
    interval: Duration,
    token: CancellationToken,
    state_tx: Arc<watch::Sender<SweeperState>>,
) {
    info!(
        "Starting TTL sweeper with interval of {} ms",
        interval.as_millis()
    );

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }

        // Hold the write lock only for the in-memory sweep
        let (removed, size) = {
            let mut guard = state.write().await;
            let removed = guard.sweep_expired(Instant::now());
            (removed, guard.total_len())
        };

        if removed > 0 {
            info!(
                "TTL sweep: removed {} expired entries, {} remaining",
                removed, size
            );
        } else {
            debug!("TTL sweep: no expired entries found");
        }
    }

    state_tx.send_replace(SweeperState::Stopped);
    debug!("Sweeper task exited");
}
