//! Background Tasks Module
//!
//! Contains the background tasks a cache runs for its lifetime.
//!
//! # Tasks
//! - Reaper: Removes expired cache entries once per interval

mod reaper;

pub use reaper::spawn_reaper;
