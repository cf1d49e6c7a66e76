//! Cache-Aside Fetching
//!
//! Wraps a slow origin (usually an HTTP endpoint) so that repeated fetches of
//! the same key are served from a [`Cache`] until the entry expires.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::cache::Cache;

// == Origin ==
/// Source of truth consulted on a cache miss.
///
/// Keys are opaque to the cache; callers typically use the request URL.
#[async_trait]
pub trait Origin: Send + Sync {
    /// Error reported when the origin cannot produce a value
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches the raw body for `key`.
    async fn fetch(&self, key: &str) -> Result<Bytes, Self::Error>;
}

// == Fetch Error ==
/// Failure of a cache-aside fetch.
#[derive(Error, Debug)]
pub enum FetchError<E>
where
    E: std::error::Error + 'static,
{
    /// The origin failed on a cache miss; nothing was cached
    #[error("Fetching {key} failed: {source}")]
    Origin { key: String, source: E },
}

// == Cached Fetcher ==
/// Looks keys up in the cache first and falls back to the origin on a miss,
/// caching whatever the origin returns.
#[derive(Debug, Clone)]
pub struct CachedFetcher<O> {
    cache: Cache,
    origin: O,
}

impl<O: Origin> CachedFetcher<O> {
    pub fn new(cache: Cache, origin: O) -> Self {
        Self { cache, origin }
    }

    /// The cache backing this fetcher.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    // == Fetch ==
    /// Returns the body for `key`, from the cache when present.
    ///
    /// On a miss the origin is asked once and a successful body is added to
    /// the cache before being returned. Origin errors are passed through and
    /// leave the cache untouched.
    pub async fn fetch(&self, key: &str) -> Result<Bytes, FetchError<O::Error>> {
        if let Some(body) = self.cache.get(key).await {
            debug!("Cache hit for {}", key);
            return Ok(body);
        }

        debug!("Cache miss for {}, fetching from origin", key);
        let body = self
            .origin
            .fetch(key)
            .await
            .map_err(|source| FetchError::Origin {
                key: key.to_string(),
                source,
            })?;

        self.cache.add(key, body.clone()).await;
        Ok(body)
    }
}
