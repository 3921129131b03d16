//! Utility functions and traits for `ChainedHashTable`

use crate::{ChainedHashTable, TableError};

/// Extension trait for map implementations that provides additional utility methods
pub trait HashMapExtensions {
    /// Returns the keys of the hash map as a Vec
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the hash map as a Vec
    fn values(&self) -> Vec<String>;

    /// Returns true if the hash map contains the given key
    fn contains_key(&self, key: &str) -> bool;
}

impl HashMapExtensions for ChainedHashTable {
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    fn values(&self) -> Vec<String> {
        self.iter().map(|(_, v)| v.to_owned()).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Creates a `ChainedHashTable` with `capacity` slots from an iterator of key-value pairs.
///
/// # Errors
///
/// Returns the first error raised by table construction or by a put, e.g.
/// `TableError::InvalidKey` for an empty key.
pub fn from_pairs<I, K, V>(capacity: usize, iter: I) -> Result<ChainedHashTable, TableError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut map = ChainedHashTable::new(capacity)?;

    for (key, value) in iter {
        map.put(key.as_ref(), value.as_ref())?;
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs() -> Result<(), TableError> {
        let data = vec![("a", "1"), ("b", "2"), ("c", "3")];

        let map = from_pairs(4, data)?;

        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.get("b"), Some("2"));
        assert_eq!(map.get("c"), Some("3"));
        assert_eq!(map.len(), 3);
        Ok(())
    }

    #[test]
    fn test_from_pairs_stops_at_empty_key() {
        let data = [("a".to_string(), "1".to_string()), (String::new(), "2".to_string())];

        assert_eq!(from_pairs(4, data).err(), Some(TableError::InvalidKey));
        assert_eq!(from_pairs(0, [("a", "1")]).err(), Some(TableError::InvalidCapacity));
    }

    #[test]
    fn test_keys_and_values() -> Result<(), TableError> {
        let map = from_pairs(8, [("a", "1"), ("b", "2"), ("c", "3")])?;

        let mut keys = map.keys();
        keys.sort(); // Sort for predictable comparison

        let mut values = map.values();
        values.sort_unstable();

        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec!["1".to_string(), "2".to_string(), "3".to_string()]);
        Ok(())
    }

    #[test]
    fn test_contains_key() -> Result<(), TableError> {
        let map = from_pairs(8, [("a", "1")])?;

        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));
        assert!(!map.contains_key(""));
        Ok(())
    }
}
