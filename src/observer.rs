//! Trace hooks invoked at the boundary of mutating table operations

use log::Level;

use crate::chained_hashmap::Insertion;

/// A structural change reported by `ChainedHashTable` after it has happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent<'a> {
    /// A new chain was opened in a previously unused slot
    Inserted {
        /// Inserted key
        key: &'a str,
        /// Inserted value
        value: &'a str,
        /// Slot the chain lives in
        index: usize,
    },
    /// The entry was pushed onto an existing chain
    Appended {
        /// Inserted key
        key: &'a str,
        /// Inserted value
        value: &'a str,
        /// Slot of the chain
        index: usize,
        /// Position of the new entry inside the chain
        position: usize,
    },
    /// An existing entry had its value replaced
    Updated {
        /// Key of the updated entry
        key: &'a str,
        /// New value
        value: &'a str,
        /// Slot of the chain
        index: usize,
        /// Value that was replaced
        previous: &'a str,
    },
    /// A put was refused because the key was empty
    Rejected {
        /// Value that was not stored
        value: &'a str,
    },
    /// An entry was taken out of its chain
    Removed {
        /// Removed key
        key: &'a str,
        /// Removed value
        value: &'a str,
        /// Slot the entry was removed from
        index: usize,
    },
    /// The slot array was doubled and every entry relinked
    Resized {
        /// Slot count before the resize
        from: usize,
        /// Slot count after the resize
        to: usize,
    },
}

impl<'a> TableEvent<'a> {
    /// Describes a completed put of `key`/`value`.
    pub(crate) fn from_insertion(key: &'a str, value: &'a str, insertion: &'a Insertion) -> Self {
        match *insertion {
            Insertion::Inserted { index } => Self::Inserted { key, value, index },
            Insertion::Appended { index, position } => {
                Self::Appended { key, value, index, position }
            }
            Insertion::Updated { index, ref previous } => {
                Self::Updated { key, value, index, previous: previous.as_str() }
            }
        }
    }
}

/// Receives a `TableEvent` after each mutating operation.
///
/// Any `FnMut(&TableEvent<'_>)` closure is an observer.
pub trait TableObserver {
    /// Called once per completed structural change
    fn on_event(&mut self, event: &TableEvent<'_>);
}

impl<F> TableObserver for F
where
    F: FnMut(&TableEvent<'_>),
{
    fn on_event(&mut self, event: &TableEvent<'_>) {
        self(event);
    }
}

/// Observer that writes every event to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    /// Level the events are logged at
    level: Level,
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl LogObserver {
    /// Creates an observer logging at `level`
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Level this observer logs at
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }
}

impl TableObserver for LogObserver {
    fn on_event(&mut self, event: &TableEvent<'_>) {
        match *event {
            TableEvent::Inserted { key, value, index } => {
                log::log!(self.level, "insert entry ('{key}', '{value}') @ index {index}");
            }
            TableEvent::Appended { key, value, index, position } => log::log!(
                self.level,
                "collision @ index {index} for entry ('{key}', '{value}'), appended at position {position}"
            ),
            TableEvent::Updated { key, value, index, previous } => log::log!(
                self.level,
                "updated entry ('{key}', '{value}') @ index {index}, was '{previous}'"
            ),
            TableEvent::Rejected { value } => {
                log::log!(self.level, "rejected entry ('', '{value}'): empty key");
            }
            TableEvent::Removed { key, value, index } => {
                log::log!(self.level, "removed entry ('{key}', '{value}') @ index {index}");
            }
            TableEvent::Resized { from, to } => {
                log::log!(self.level, "resized from {from} to {to} slots");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_an_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |event: &TableEvent<'_>| seen.push(format!("{event:?}"));
            observer.on_event(&TableEvent::Resized { from: 7, to: 14 });
            observer.on_event(&TableEvent::Rejected { value: "unemployed" });
        }

        assert_eq!(seen.len(), 2);
        assert_eq!(seen.first().map(String::as_str), Some("Resized { from: 7, to: 14 }"));
    }

    #[test]
    fn test_event_from_insertion() {
        let updated = Insertion::Updated { index: 6, previous: "Cashier".to_string() };
        let event = TableEvent::from_insertion("Thomas", "Cashier's Manager", &updated);
        assert_eq!(
            event,
            TableEvent::Updated {
                key: "Thomas",
                value: "Cashier's Manager",
                index: 6,
                previous: "Cashier",
            }
        );

        let appended = Insertion::Appended { index: 5, position: 1 };
        assert_eq!(
            TableEvent::from_insertion("Fox", "FBI agent", &appended),
            TableEvent::Appended { key: "Fox", value: "FBI agent", index: 5, position: 1 }
        );
    }

    #[test]
    fn test_log_observer_accepts_every_event() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut observer = LogObserver::new(Level::Debug);
        assert_eq!(observer.level(), Level::Debug);

        observer.on_event(&TableEvent::Inserted { key: "Kevin", value: "Engineer", index: 6 });
        observer.on_event(&TableEvent::Removed { key: "Kevin", value: "Engineer", index: 6 });
        observer.on_event(&TableEvent::Resized { from: 7, to: 14 });
        assert_eq!(LogObserver::default().level(), Level::Info);
    }
}
