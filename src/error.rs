//! Error types for `ChainedHashTable` and `DynamicArray`

use std::collections::TryReserveError;

/// The error type for table construction and mutation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// The key was empty, which the table treats as the absent key.
    ///
    /// Nothing is inserted when this is returned.
    #[error("empty keys are not allowed in the table")]
    InvalidKey,

    /// A table was requested with zero slots.
    #[error("initial capacity must be at least 1")]
    InvalidCapacity,

    /// The load-factor threshold was zero, negative, NaN or infinite.
    #[error("load factor threshold must be a positive finite number, got {threshold}")]
    InvalidThreshold {
        /// The rejected threshold
        threshold: f64,
    },

    /// Doubling the slot count would overflow `usize`.
    #[error("cannot grow a table of {capacity} slots without overflowing")]
    CapacityOverflow {
        /// Slot count at the time of the failed resize
        capacity: usize,
    },

    /// The allocator refused storage for the resized slot array.
    #[error("failed to allocate {requested} slots while resizing")]
    AllocationFailure {
        /// Slot count that could not be reserved
        requested: usize,
        /// Underlying reservation error
        #[source]
        source: TryReserveError,
    },
}

/// The error type for `DynamicArray` positional access.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayError {
    /// The index was not below the number of stored items.
    #[error("index {index} is out of bounds for an array of {len} items")]
    IndexOutOfBounds {
        /// Requested position
        index: usize,
        /// Number of stored items
        len: usize,
    },
}
