//! # Collection Error Types
//!
//! All errors that can occur in the spatial map and the struct stacks.
//!
//! Every failure is local and synchronous: the collection that reports it is
//! left exactly as it was before the call.

use thiserror::Error;

/// Errors that can occur in TESSERA collections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// An argument the operation cannot accept (absent map value, zero size).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Push or duplicate on a full stack.
    #[error("stack overflow: capacity {capacity}")]
    StackOverflow {
        /// Capacity of the stack.
        capacity: usize,
    },

    /// Pop or peek asked for more records than the stack holds.
    #[error("stack underflow: requested {requested}, available {available}")]
    StackUnderflow {
        /// Number of records the operation needed.
        requested: usize,
        /// Number of records on the stack.
        available: usize,
    },

    /// The map was structurally modified after a cursor was created.
    #[error("concurrent modification: cursor expected revision {expected}, map is at {actual}")]
    ConcurrentModification {
        /// Modification count captured by the cursor.
        expected: u64,
        /// Live modification count of the map.
        actual: u64,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CollectionError::StackUnderflow {
            requested: 3,
            available: 1,
        };
        assert_eq!(err.to_string(), "stack underflow: requested 3, available 1");

        let err = CollectionError::InvalidArgument("map values cannot be absent");
        assert_eq!(err.to_string(), "invalid argument: map values cannot be absent");
    }
}
