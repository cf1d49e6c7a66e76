//! Cache Entry Module
//!
//! Defines a single cached value together with the instant it was stored.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry: the stored bytes and their creation time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: Bytes,
    /// Instant the value was inserted or last overwritten
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self::new_at(value, Instant::now())
    }

    /// Creates an entry with an explicit creation instant.
    pub fn new_at(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Time elapsed between creation and `now`.
    ///
    /// Saturates to zero if `now` is earlier than the creation instant.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `interval` as of `now`.
    ///
    /// Boundary condition: the age must strictly exceed the interval. An entry
    /// whose age equals the interval is still live and survives the sweep.
    pub fn is_expired(&self, interval: Duration, now: Instant) -> bool {
        self.age(now) > interval
    }
}
