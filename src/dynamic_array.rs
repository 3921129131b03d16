use std::fmt;

use crate::error::ArrayError;

/// A growable array over a boxed slice of slots.
///
/// Items are packed at the front of the storage; `insert` doubles the storage
/// when every slot is taken.
#[derive(Debug, Clone)]
pub struct DynamicArray<T> {
    /// Backing storage, the first `len` slots are occupied
    items: Box<[Option<T>]>,
    /// Number of stored items
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an array with room for `capacity` items, at least one
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: empty_slots(capacity.max(1)), len: 0 }
    }

    /// Appends `item`, growing the storage if it is full
    pub fn insert(&mut self, item: T) {
        if self.len == self.items.len() {
            self.grow();
        }
        if let Some(slot) = self.items.get_mut(self.len) {
            *slot = Some(item);
            self.len = self.len.saturating_add(1);
        }
    }

    /// Removes the item at `index` and shifts everything after it one slot left.
    ///
    /// # Errors
    ///
    /// `ArrayError::IndexOutOfBounds` if `index` is not below `len()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, ArrayError> {
        let out_of_bounds = ArrayError::IndexOutOfBounds { index, len: self.len };
        if index >= self.len {
            return Err(out_of_bounds);
        }

        let item = self.items.get_mut(index).and_then(Option::take).ok_or(out_of_bounds)?;
        if let Some(tail) = self.items.get_mut(index..self.len) {
            tail.rotate_left(1);
        }
        self.len = self.len.saturating_sub(1);
        Ok(item)
    }

    /// Item at `index`, if any
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index).and_then(Option::as_ref)
    }

    /// Number of stored items
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no item is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of items the storage holds before it grows
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the stored items in order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map_while(Option::as_ref)
    }

    /// Doubles the storage and moves the items over
    fn grow(&mut self) {
        let mut items = empty_slots(self.items.len().saturating_mul(2).max(1));
        for (dst, src) in items.iter_mut().zip(self.items.iter_mut()) {
            *dst = src.take();
        }
        self.items = items;
    }
}

impl<T: PartialEq> DynamicArray<T> {
    /// Position of the first item equal to `item`
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.iter().position(|candidate| candidate == item)
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::with_capacity(1)
    }
}

/// Prints one item per line
impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.iter() {
            writeln!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}
