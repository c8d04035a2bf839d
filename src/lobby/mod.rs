//! Teammate lobby readiness.
//!
//! The lobby starts in `Spawning` and flips to `Ready` once the spawn
//! delay elapses. If the session is torn down first, the timer result is
//! dropped.

mod intent;
mod reducer;
mod state;

use std::time::Duration;

use crate::session::LifecycleHandle;

pub use intent::LobbyIntent;
pub use reducer::LobbyReducer;
pub use state::LobbyStatus;

/// Wait out the spawn delay. Returns `None` if the session is torn down
/// before the delay elapses.
pub async fn wait_for_spawn(delay: Duration, lifecycle: &LifecycleHandle) -> Option<LobbyIntent> {
    tokio::select! {
        biased;
        _ = lifecycle.wait() => None,
        _ = tokio::time::sleep(delay) => Some(LobbyIntent::SpawnCompleted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionLifecycle;

    #[tokio::test]
    async fn completes_after_delay() {
        let lifecycle = SessionLifecycle::new();
        let intent = wait_for_spawn(Duration::from_millis(5), &lifecycle.handle()).await;
        assert_eq!(intent, Some(LobbyIntent::SpawnCompleted));
    }

    #[tokio::test]
    async fn teardown_cancels_spawn() {
        let lifecycle = SessionLifecycle::new();
        let handle = lifecycle.handle();
        lifecycle.tear_down();
        assert_eq!(wait_for_spawn(Duration::from_secs(30), &handle).await, None);
    }
}
