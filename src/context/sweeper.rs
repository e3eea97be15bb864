//! Background eviction of idle sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::context::SummaryStore;

/// Longest accepted pause between sweeps.
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Periodically evict sessions that have not been updated within `ttl`.
///
/// The first sweep runs one `interval` after spawning. Intervals longer than
/// [`MAX_SWEEP_INTERVAL`] are clamped to it. Store errors are logged and the
/// loop keeps going. Abort the returned handle to stop sweeping.
pub fn spawn_idle_sweeper(
    store: Arc<dyn SummaryStore>,
    ttl: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    let interval = interval.min(MAX_SWEEP_INTERVAL);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match store.evict_idle(ttl).await {
                Ok(0) => {}
                Ok(evicted) => {
                    tracing::info!(evicted, ttl_secs = ttl.as_secs(), "Evicted idle sessions");
                }
                Err(e) => {
                    tracing::warn!("Idle session sweep failed: {}", e);
                }
            }
        }
    })
}
