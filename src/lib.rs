//! Expiring Cache - An in-memory byte cache with interval-based expiration
//!
//! Entries are keyed by string (typically a fetch URL) and removed by a
//! background reaper once they are older than the cache's interval.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod tasks;

pub use cache::{Cache, CacheStats};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use fetch::{CachedFetcher, FetchError, Origin};
