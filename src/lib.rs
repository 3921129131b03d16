//! # Chained Hash Table
//!
//! A Rust implementation of a string-keyed hash table that resolves collisions
//! by separate chaining.
//!
//! This crate provides:
//!
//! - `ChainedHashTable`: a single-threaded table whose slots hold chains of entries,
//!   doubling its slot array once the load factor reaches a threshold
//! - `DynamicArray`: a small growable array with positional removal
//!
//! Every slot starts unused and turns into a chain on the first key that hashes to
//! it. Growth is checked only when a put opens a new chain, and the check uses
//! truncating integer division unless `GrowthCheck::Fractional` is selected.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::{ChainedHashTable, Insertion, TableError};
//!
//! # fn main() -> Result<(), TableError> {
//! // Create a table with 7 slots
//! let mut table = ChainedHashTable::new(7)?;
//!
//! // Insert values
//! table.put("Kevin", "Software Engineer")?;
//! table.put("Glen", "Gardener")?;
//!
//! // "Thomas" lands in the same slot as "Kevin"
//! let insertion = table.put("Thomas", "Cashier")?;
//! assert_eq!(insertion, Insertion::Appended { index: 6, position: 1 });
//!
//! // Retrieve values
//! assert_eq!(table.get("Thomas"), Some("Cashier"));
//!
//! // Update values
//! table.put("Thomas", "Cashier's Manager")?;
//! assert_eq!(table.size(), 3);
//!
//! // Empty keys are refused
//! assert_eq!(table.put("", "unemployed"), Err(TableError::InvalidKey));
//!
//! // Remove values
//! let removed = table.remove("Thomas").map(|entry| entry.into_parts());
//! assert_eq!(removed, Some(("Thomas".to_string(), "Cashier's Manager".to_string())));
//! assert!(!table.contains("Thomas"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Tracing
//!
//! ```rust
//! use chainmap::{ChainedHashTable, LogObserver, TableError};
//!
//! # fn main() -> Result<(), TableError> {
//! let mut table = ChainedHashTable::builder(7)
//!     .threshold(1.0)
//!     .observer(LogObserver::new(log::Level::Debug))
//!     .build()?;
//!
//! for (key, value) in [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5"), ("f", "6"), ("g", "7")] {
//!     table.put(key, value)?;
//! }
//!
//! // Seven chains in seven slots reached the threshold
//! assert_eq!(table.capacity(), 14);
//! println!("{table}");
//! # Ok(())
//! # }
//! ```

/// Module implementing the separate-chaining hash table
mod chained_hashmap;
/// Module implementing the growable array
mod dynamic_array;
/// Error types
mod error;
/// Trace hooks for table mutations
mod observer;
/// Utility functions and traits for the hash table
pub mod utils;

pub use chained_hashmap::{
    ChainStats, ChainedHashTable, ChainedHashTableBuilder, DEFAULT_INITIAL_CAPACITY,
    DEFAULT_LOAD_FACTOR_THRESHOLD, Entry, GrowthCheck, Insertion, Iter, Slot, hash_index,
};
pub use dynamic_array::DynamicArray;
pub use error::{ArrayError, TableError};
pub use observer::{LogObserver, TableEvent, TableObserver};
pub use utils::HashMapExtensions;
