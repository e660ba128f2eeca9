//! MemKit - in-memory data structure primitives
//!
//! Provides a fixed-capacity cache with strict LRU eviction and a string
//! membership set built on open addressing with linear probing.

pub mod cache;
pub mod config;
pub mod error;
pub mod set;

pub use cache::LruCache;
pub use config::Config;
pub use error::{MemKitError, Result};
pub use set::{CompactionStrategy, ProbingSet, Slot};
