//! Configuration Module
//!
//! Handles loading demo driver configuration from environment variables.

use std::env;

use crate::set::CompactionStrategy;

/// Demo driver configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed capacity of the LRU cache
    pub cache_capacity: usize,
    /// Initial capacity of the probing set
    pub set_capacity: usize,
    /// Tombstone ratio that triggers set compaction; None means compact
    /// eagerly after every delete
    pub tombstone_ratio: Option<f64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - LRU cache capacity (default: 3)
    /// - `SET_CAPACITY` - Probing set initial capacity (default: 20)
    /// - `TOMBSTONE_RATIO` - Compaction trigger ratio (default: unset, eager)
    pub fn from_env() -> Self {
        Self {
            cache_capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            set_capacity: env::var("SET_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            tombstone_ratio: env::var("TOMBSTONE_RATIO")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Returns the compaction strategy selected by this configuration.
    pub fn compaction(&self) -> CompactionStrategy {
        match self.tombstone_ratio {
            Some(ratio) => CompactionStrategy::TombstoneRatio(ratio),
            None => CompactionStrategy::Eager,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 3,
            set_capacity: 20,
            tombstone_ratio: None,
        }
    }
}
