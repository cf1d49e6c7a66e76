//! Expiry Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// First-wake fallback for intervals that overflow an instant, about 30 years.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Spawns a background task that sweeps expired entries out of `store`.
///
/// The task wakes once per `interval`, the first wake being one full interval
/// after spawning. Each wake takes the store lock for a single sweep that
/// drops every entry older than `interval`. The task runs until `token` is
/// cancelled.
///
/// # Arguments
/// * `store` - Shared store the cache handle also locks
/// * `interval` - Wake period and expiry age
/// * `token` - Cancellation signal; the task exits as soon as it fires
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new()));
/// let token = CancellationToken::new();
/// let handle = spawn_reaper(store.clone(), Duration::from_secs(300), token.clone());
/// // Later:
/// token.cancel();
/// handle.await?;
/// ```
pub fn spawn_reaper(
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    token: CancellationToken,
) -> JoinHandle<()> {
    let now = Instant::now();
    let first_wake = now
        .checked_add(interval)
        .unwrap_or_else(|| now + FAR_FUTURE);
    let mut ticker = time::interval_at(first_wake, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::spawn(async move {
        info!("Starting cache reaper with interval of {:?}", interval);

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let removed = {
                let mut guard = store.lock().await;
                guard.sweep(interval, Instant::now())
            };

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }

        info!("Cache reaper stopped");
    })
}
