//! Session teardown signalling.
//!
//! The view layer tears a session down when its screen unmounts. Any
//! provider call still suspended at that point must not resume into the
//! defunct state machine; the orchestrator races each suspension point
//! against [`SessionLifecycle::wait`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

pub struct SessionLifecycle {
    torn_down: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl SessionLifecycle {
    pub fn new() -> Self {
        Self {
            torn_down: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Signal teardown. Idempotent.
    pub fn tear_down(&self) {
        signal(&self.torn_down, &self.notify);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Resolve once the session is torn down.
    pub async fn wait(&self) {
        wait(&self.torn_down, &self.notify).await;
    }

    /// Create a handle for the view layer.
    pub fn handle(&self) -> LifecycleHandle {
        LifecycleHandle {
            torn_down: Arc::clone(&self.torn_down),
            notify: Arc::clone(&self.notify),
        }
    }
}

impl Default for SessionLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Lightweight handle for tearing down or observing a session.
#[derive(Clone)]
pub struct LifecycleHandle {
    torn_down: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl LifecycleHandle {
    pub fn tear_down(&self) {
        signal(&self.torn_down, &self.notify);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    pub async fn wait(&self) {
        wait(&self.torn_down, &self.notify).await;
    }
}

fn signal(flag: &AtomicBool, notify: &Notify) {
    if !flag.swap(true, Ordering::SeqCst) {
        tracing::debug!("Session torn down");
        notify.notify_waiters();
    }
}

async fn wait(flag: &AtomicBool, notify: &Notify) {
    // Register with Notify before reading the flag so a signal landing in
    // between is not lost.
    let notified = notify.notified();
    tokio::pin!(notified);
    notified.as_mut().enable();
    if flag.load(Ordering::SeqCst) {
        return;
    }
    notified.await;
}
