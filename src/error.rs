//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while building a cache.
///
/// Lookups and inserts never fail; a miss is reported as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Expiration interval must be greater than zero
    #[error("Invalid interval: {0:?} (must be greater than zero)")]
    InvalidInterval(Duration),

    /// Expiration interval is too long to schedule the reaper's first wake
    #[error("Invalid interval: {0:?} (too large to schedule)")]
    IntervalTooLarge(Duration),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
