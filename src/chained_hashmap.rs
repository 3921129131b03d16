use std::{fmt, iter::FusedIterator, mem, slice};

use crate::{
    error::TableError,
    observer::{TableEvent, TableObserver},
};

/// Slot count used by `ChainedHashTable::default`
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Load-factor threshold used unless the builder overrides it
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 3.0;

/// Maps `key` to a slot of a table with `capacity` slots.
///
/// The hash is a polynomial over the key's UTF-16 code units with multiplier 31,
/// computed in wrapping 32-bit signed arithmetic. Its magnitude is reduced modulo
/// `capacity`, so the result depends on nothing but `key` and `capacity`.
/// A zero `capacity` maps every key to 0.
#[must_use]
pub fn hash_index(key: &str, capacity: usize) -> usize {
    let code = key
        .encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)));

    usize::try_from(code.unsigned_abs())
        .ok()
        .and_then(|magnitude| magnitude.checked_rem(capacity))
        .unwrap_or(0)
}

/// A key-value pair owned by the table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// Unique key of the entry
    key: String,
    /// Value, replaced in place on update
    value: String,
}

impl Entry {
    /// Creates an entry from borrowed parts
    fn new(key: &str, value: &str) -> Self {
        Self { key: key.to_owned(), value: value.to_owned() }
    }

    /// The entry's key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entry's value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Splits the entry into `(key, value)`
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.value)
    }
}

/// One position of the slot array.
///
/// A slot starts `Unused` and becomes a `Chain` on the first insert that hashes
/// to it. Removing the last entry of a chain leaves an empty `Chain`, never
/// `Unused`; the difference only shows up in introspection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Slot {
    /// No entry has ever hashed here
    #[default]
    Unused,
    /// Entries sharing this slot, in insertion order
    Chain(Vec<Entry>),
}

impl Slot {
    /// Entries stored in this slot; empty for `Unused`
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        match self {
            Self::Unused => &[],
            Self::Chain(chain) => chain,
        }
    }

    /// Returns true if no chain was ever allocated here
    #[must_use]
    pub fn is_unused(&self) -> bool {
        matches!(self, Self::Unused)
    }

    /// Consumes the slot and returns its chain
    fn into_entries(self) -> Vec<Entry> {
        match self {
            Self::Unused => Vec::new(),
            Self::Chain(chain) => chain,
        }
    }

    /// Appends `entry` to the chain, opening one if needed
    fn push(&mut self, entry: Entry) {
        match *self {
            Self::Unused => *self = Self::Chain(vec![entry]),
            Self::Chain(ref mut chain) => chain.push(entry),
        }
    }
}

/// Outcome of a successful `ChainedHashTable::put`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// A new chain was opened in an unused slot
    Inserted {
        /// Slot of the new chain
        index: usize,
    },
    /// The key was new and collided with an existing chain
    Appended {
        /// Slot of the chain
        index: usize,
        /// Position of the new entry in the chain
        position: usize,
    },
    /// The key was present and its value was overwritten
    Updated {
        /// Slot of the chain
        index: usize,
        /// Value before the update
        previous: String,
    },
}

impl Insertion {
    /// Slot the key was placed in, at the capacity in effect during the put
    #[must_use]
    pub fn index(&self) -> usize {
        match *self {
            Self::Inserted { index } | Self::Appended { index, .. } | Self::Updated { index, .. } => {
                index
            }
        }
    }

    /// Returns true if the put added a key rather than updating one
    #[must_use]
    pub fn is_new_key(&self) -> bool {
        !matches!(self, Self::Updated { .. })
    }
}

/// How the load factor is compared against the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowthCheck {
    /// `count / capacity` in integer division, so growth starts only once the
    /// truncated ratio reaches the threshold
    #[default]
    Truncating,
    /// Exact `count / capacity` ratio
    Fractional,
}

/// Chain length summary of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStats {
    /// Number of slots
    pub capacity: usize,
    /// Number of entries
    pub count: usize,
    /// Slots that never held a chain
    pub unused_slots: usize,
    /// Chains that were emptied by removals
    pub empty_chains: usize,
    /// Chains holding at least one entry
    pub occupied_chains: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
}

impl ChainStats {
    /// Mean length of the non-empty chains, 0 when there are none
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_chain_len(&self) -> f64 {
        if self.occupied_chains == 0 {
            return 0.0;
        }
        self.count as f64 / self.occupied_chains as f64
    }
}

/// Configures a `ChainedHashTable` before it is built.
pub struct ChainedHashTableBuilder {
    /// Number of slots the table starts with
    initial_capacity: usize,
    /// Load-factor threshold that triggers growth
    threshold: f64,
    /// How the load factor is computed
    growth_check: GrowthCheck,
    /// Trace callback handed to the table
    observer: Option<Box<dyn TableObserver>>,
}

impl fmt::Debug for ChainedHashTableBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedHashTableBuilder")
            .field("initial_capacity", &self.initial_capacity)
            .field("threshold", &self.threshold)
            .field("growth_check", &self.growth_check)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl ChainedHashTableBuilder {
    /// Starts a builder for a table with `initial_capacity` slots
    #[must_use]
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
            growth_check: GrowthCheck::default(),
            observer: None,
        }
    }

    /// Sets the load-factor threshold
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets how the load factor is compared against the threshold
    #[must_use]
    pub fn growth_check(mut self, growth_check: GrowthCheck) -> Self {
        self.growth_check = growth_check;
        self
    }

    /// Installs a trace callback
    #[must_use]
    pub fn observer(mut self, observer: impl TableObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Builds the table.
    ///
    /// # Errors
    ///
    /// `TableError::InvalidCapacity` for zero slots and
    /// `TableError::InvalidThreshold` for a threshold that is not a positive
    /// finite number.
    pub fn build(self) -> Result<ChainedHashTable, TableError> {
        if self.initial_capacity == 0 {
            return Err(TableError::InvalidCapacity);
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(TableError::InvalidThreshold { threshold: self.threshold });
        }

        let mut slots = Vec::new();
        slots.resize_with(self.initial_capacity, Slot::default);

        Ok(ChainedHashTable {
            slots,
            count: 0,
            threshold: self.threshold,
            growth_check: self.growth_check,
            observer: self.observer,
        })
    }
}

/// A string-keyed hash table resolving collisions by separate chaining.
///
/// Each slot holds a chain of entries in insertion order. A put that opens a new
/// chain checks the load factor and doubles the slot array once it reaches the
/// threshold.
///
/// Note: This implementation is not thread-safe. Wrap the whole table in a
/// single lock if it has to be shared.
pub struct ChainedHashTable {
    /// The slot array, `capacity` long
    slots: Vec<Slot>,
    /// Total number of entries across all chains
    count: usize,
    /// Load-factor threshold that triggers growth
    threshold: f64,
    /// How the load factor is computed
    growth_check: GrowthCheck,
    /// Optional trace callback
    observer: Option<Box<dyn TableObserver>>,
}

impl fmt::Debug for ChainedHashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedHashTable")
            .field("capacity", &self.slots.len())
            .field("count", &self.count)
            .field("threshold", &self.threshold)
            .field("growth_check", &self.growth_check)
            .finish_non_exhaustive()
    }
}

impl Default for ChainedHashTable {
    fn default() -> Self {
        let mut slots = Vec::new();
        slots.resize_with(DEFAULT_INITIAL_CAPACITY, Slot::default);
        Self {
            slots,
            count: 0,
            threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
            growth_check: GrowthCheck::default(),
            observer: None,
        }
    }
}

impl ChainedHashTable {
    /// Creates a table with `initial_capacity` slots and default settings.
    ///
    /// # Errors
    ///
    /// `TableError::InvalidCapacity` if `initial_capacity` is 0.
    pub fn new(initial_capacity: usize) -> Result<Self, TableError> {
        ChainedHashTableBuilder::new(initial_capacity).build()
    }

    /// Starts a builder for a table with `initial_capacity` slots
    #[must_use]
    pub fn builder(initial_capacity: usize) -> ChainedHashTableBuilder {
        ChainedHashTableBuilder::new(initial_capacity)
    }

    /// Slot `key` maps to at the current capacity
    #[must_use]
    pub fn index_of(&self, key: &str) -> usize {
        hash_index(key, self.slots.len())
    }

    /// Inserts `key` with `value`, or overwrites the value if `key` is present.
    ///
    /// Only a put that opens a new chain checks the load factor, and it resizes
    /// after the entry is in place.
    ///
    /// # Errors
    ///
    /// `TableError::InvalidKey` for an empty key, which leaves the table unchanged.
    /// `TableError::CapacityOverflow` or `TableError::AllocationFailure` if the
    /// triggered resize could not grow the slot array; the entry stays inserted.
    pub fn put(&mut self, key: &str, value: &str) -> Result<Insertion, TableError> {
        if key.is_empty() {
            log::warn!("cannot insert entry ('', '{value}'): empty keys are not allowed");
            self.notify(&TableEvent::Rejected { value });
            return Err(TableError::InvalidKey);
        }

        let index = self.index_of(key);
        let insertion = self.place(index, key, value);
        self.notify(&TableEvent::from_insertion(key, value, &insertion));

        if matches!(insertion, Insertion::Inserted { .. }) && self.reached_threshold() {
            self.resize()?;
        }

        Ok(insertion)
    }

    /// Puts `key`/`value` into the chain at `index` without checking the load factor
    fn place(&mut self, index: usize, key: &str, value: &str) -> Insertion {
        #[allow(clippy::indexing_slicing)] // `index` was reduced modulo `slots.len()`
        let slot = &mut self.slots[index];

        let insertion = match *slot {
            Slot::Unused => {
                *slot = Slot::Chain(vec![Entry::new(key, value)]);
                Insertion::Inserted { index }
            }
            Slot::Chain(ref mut chain) => {
                if let Some(existing) = chain.iter_mut().find(|entry| entry.key == key) {
                    let previous = mem::replace(&mut existing.value, value.to_owned());
                    return Insertion::Updated { index, previous };
                }
                chain.push(Entry::new(key, value));
                Insertion::Appended { index, position: chain.len().saturating_sub(1) }
            }
        };

        self.count = self.count.saturating_add(1);
        insertion
    }

    /// Returns true if the current load factor has reached the threshold
    #[allow(clippy::cast_precision_loss)]
    fn reached_threshold(&self) -> bool {
        let capacity = self.slots.len();
        let ratio = match self.growth_check {
            GrowthCheck::Truncating => self.count.checked_div(capacity).unwrap_or(0) as f64,
            GrowthCheck::Fractional => self.load_factor(),
        };
        ratio >= self.threshold
    }

    /// Value stored for `key`, if any
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        if key.is_empty() {
            return None;
        }
        self.slots
            .get(self.index_of(key))?
            .entries()
            .iter()
            .find(|entry| entry.key == key)
            .map(Entry::value)
    }

    /// Returns true if `key` is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` and returns its entry.
    ///
    /// The chain the entry lived in stays allocated even when it becomes empty.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        if key.is_empty() {
            log::warn!("cannot remove entry for an empty key");
            return None;
        }
        if self.is_empty() {
            return None;
        }

        let index = self.index_of(key);
        let Some(Slot::Chain(chain)) = self.slots.get_mut(index) else {
            return None;
        };
        let position = chain.iter().position(|entry| entry.key == key)?;
        let entry = chain.remove(position);
        self.count = self.count.saturating_sub(1);

        self.notify(&TableEvent::Removed { key: &entry.key, value: &entry.value, index });
        Some(entry)
    }

    /// Doubles the slot array and relinks every entry.
    ///
    /// Entries are relinked in slot order and, within a slot, in chain order, so
    /// chains keep their relative order. Relinking never checks the load factor.
    ///
    /// # Errors
    ///
    /// `TableError::CapacityOverflow` if the doubled slot count does not fit in
    /// `usize`, `TableError::AllocationFailure` if it cannot be allocated. The table
    /// is unchanged in both cases.
    pub fn resize(&mut self) -> Result<(), TableError> {
        let from = self.slots.len();
        let to = from.checked_mul(2).ok_or(TableError::CapacityOverflow { capacity: from })?;

        let mut slots: Vec<Slot> = Vec::new();
        slots
            .try_reserve_exact(to)
            .map_err(|source| TableError::AllocationFailure { requested: to, source })?;
        slots.resize_with(to, Slot::default);

        let old = mem::replace(&mut self.slots, slots);
        self.count = 0;
        for entry in old.into_iter().flat_map(Slot::into_entries) {
            let index = hash_index(&entry.key, to);
            if let Some(slot) = self.slots.get_mut(index) {
                slot.push(entry);
                self.count = self.count.saturating_add(1);
            }
        }

        log::debug!("resized table from {from} to {to} slots, {} entries relinked", self.count);
        self.notify(&TableEvent::Resized { from, to });
        Ok(())
    }

    /// Number of entries
    #[must_use]
    pub fn size(&self) -> usize {
        self.count
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if there are as many entries as slots.
    ///
    /// This is only a hint: chains are unbounded, so a "full" table still accepts
    /// inserts.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Load-factor threshold that triggers growth
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// How the load factor is compared against the threshold
    #[must_use]
    pub fn growth_check(&self) -> GrowthCheck {
        self.growth_check
    }

    /// Exact ratio of entries to slots
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.slots.len() as f64
    }

    /// The slot array
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Chain at `index`, `None` if the slot is unused or out of range
    #[must_use]
    pub fn chain(&self, index: usize) -> Option<&[Entry]> {
        match self.slots.get(index)? {
            Slot::Unused => None,
            Slot::Chain(chain) => Some(chain),
        }
    }

    /// Summarises chain lengths
    #[must_use]
    pub fn chain_stats(&self) -> ChainStats {
        let mut stats = ChainStats {
            capacity: self.slots.len(),
            count: self.count,
            unused_slots: 0,
            empty_chains: 0,
            occupied_chains: 0,
            longest_chain: 0,
        };

        for slot in &self.slots {
            match slot {
                Slot::Unused => stats.unused_slots = stats.unused_slots.saturating_add(1),
                Slot::Chain(chain) if chain.is_empty() => {
                    stats.empty_chains = stats.empty_chains.saturating_add(1);
                }
                Slot::Chain(chain) => {
                    stats.occupied_chains = stats.occupied_chains.saturating_add(1);
                    stats.longest_chain = stats.longest_chain.max(chain.len());
                }
            }
        }

        stats
    }

    /// Returns an iterator over the key-value pairs in slot order, then chain order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter { slots: self.slots.iter(), chain: slice::Iter::default() }
    }

    /// Hands `event` to the observer, if one is installed
    fn notify(&mut self, event: &TableEvent<'_>) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(event);
        }
    }
}

/// Renders every slot as `NN | ...`, `nil` for slots that never held a chain.
impl fmt::Display for ChainedHashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INDEX | ENTRY")?;
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Unused => writeln!(f, "{index:02} | nil")?,
                Slot::Chain(chain) => {
                    write!(f, "{index:02} |")?;
                    for entry in chain {
                        write!(f, " ('{}', '{}'),", entry.key, entry.value)?;
                    }
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

/// Iterator over the key-value pairs of the table
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Slots not yet visited
    slots: slice::Iter<'a, Slot>,
    /// Remainder of the chain being walked
    chain: slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.next() {
                return Some((entry.key(), entry.value()));
            }
            self.chain = self.slots.next()?.entries().iter();
        }
    }
}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ChainedHashTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
