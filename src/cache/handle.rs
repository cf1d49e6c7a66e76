//! Cache Handle Module
//!
//! Shareable cache handle: the store behind a single lock, plus the reaper
//! that expires entries for as long as the cache is alive.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

// == Cache ==
/// In-memory byte cache whose entries expire after a fixed interval.
///
/// Cloning is cheap and every clone shares the same entries and reaper. The
/// reaper is cancelled by [`Cache::close`] or when the last clone is dropped.
///
/// # Example
/// ```ignore
/// let cache = Cache::new(Duration::from_secs(300))?;
/// cache.add("https://pokeapi.co/api/v2/location-area/", body).await;
/// if let Some(body) = cache.get("https://pokeapi.co/api/v2/location-area/").await {
///     // use the cached body
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Cache {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// Entries, shared with the reaper task
    store: Arc<Mutex<CacheStore>>,
    /// Expiration interval and reaper period
    interval: Duration,
    /// Stops the reaper
    token: CancellationToken,
    /// Reaper task, taken by `close`
    reaper: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if !self.token.is_cancelled() {
            debug!("Last cache handle dropped, stopping reaper");
            self.token.cancel();
        }
    }
}

impl Cache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidInterval`] if `interval` is zero and
    /// [`CacheError::IntervalTooLarge`] if the first reaper wake would not be
    /// representable as an instant.
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(CacheError::InvalidInterval(interval));
        }
        if Instant::now().checked_add(interval).is_none() {
            return Err(CacheError::IntervalTooLarge(interval));
        }

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let token = CancellationToken::new();
        let reaper = spawn_reaper(store.clone(), interval, token.clone());

        Ok(Self {
            inner: Arc::new(Inner {
                store,
                interval,
                token,
                reaper: Mutex::new(Some(reaper)),
            }),
        })
    }

    /// Creates a cache from validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.interval)
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous value and resetting
    /// its age. Ignored once the cache is closed.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let mut store = self.inner.store.lock().await;
        if self.is_closed() {
            debug!("Ignoring add on closed cache");
            return;
        }
        store.add(key.into(), value.into());
    }

    // == Get ==
    /// Returns the value stored under `key`, or `None` if there is none.
    ///
    /// Entries are returned until the reaper removes them, even if they are
    /// already older than the interval.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let mut store = self.inner.store.lock().await;
        if self.is_closed() {
            return None;
        }
        store.get(key)
    }

    // == Interval ==
    /// The fixed expiration interval.
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub async fn len(&self) -> usize {
        self.inner.store.lock().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.store.lock().await.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache's counters.
    pub async fn stats(&self) -> CacheStats {
        self.inner.store.lock().await.stats()
    }

    // == Close ==
    /// Stops the reaper, waits for it to exit and drops every entry.
    ///
    /// Affects all clones. Concurrent callers all return only once the
    /// entries are gone.
    pub async fn close(&self) {
        self.inner.token.cancel();

        // Held until the store is cleared so a second caller waits for the first
        let mut reaper = self.inner.reaper.lock().await;
        let first = match reaper.take() {
            Some(handle) => {
                if let Err(e) = handle.await {
                    warn!("Cache reaper ended abnormally: {}", e);
                }
                true
            }
            None => false,
        };
        self.inner.store.lock().await.clear();
        drop(reaper);

        if first {
            info!("Cache closed");
        }
    }

    // == Is Closed ==
    /// Returns true once [`Cache::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.token.is_cancelled()
    }
}
