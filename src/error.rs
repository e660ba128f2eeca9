//! Error types for the data structure primitives
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == MemKit Error Enum ==
/// Unified error type for structure construction.
///
/// Normal operations on the structures never fail. The only error
/// condition is constructing a structure with zero capacity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemKitError {
    /// Capacity must hold at least one entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

// == Result Type Alias ==
/// Convenience Result type for structure construction.
pub type Result<T> = std::result::Result<T, MemKitError>;
