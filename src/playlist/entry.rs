use std::collections::HashMap;
use std::fmt;

/// Stable handle for a playlist entry. Assigned once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u64);

impl EntryId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One playlist item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub artist: String,
}

impl Entry {
    /// Same title and same artist, compared exactly
    pub fn is_same_song(&self, title: &str, artist: &str) -> bool {
        self.title == title && self.artist == artist
    }
}

/// Owns every live entry. Index, sequence and stacks only hold `EntryId`s.
#[derive(Debug)]
pub struct EntryRegistry {
    entries: HashMap<EntryId, Entry>,
    next_id: u64,
}

impl EntryRegistry {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 1,
        }
    }

    /// The id the next committed entry will get. Does not consume it.
    pub fn peek_next_id(&self) -> EntryId {
        EntryId(self.next_id)
    }

    /// Store a new entry and advance the counter
    pub fn commit(&mut self, title: String, artist: String) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, Entry { id, title, artist });
        id
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Drop ownership of an entry. Callers must have detached it everywhere else first.
    pub fn release(&mut self, id: EntryId) -> Option<Entry> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EntryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut registry = EntryRegistry::new();
        let a = registry.commit("A".into(), "X".into());
        let b = registry.commit("B".into(), "Y".into());
        assert_eq!(a, EntryId(1));
        assert_eq!(b, EntryId(2));

        registry.release(b);
        let c = registry.commit("C".into(), "Z".into());
        assert_eq!(c, EntryId(3));
        assert!(!registry.contains(b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let registry = EntryRegistry::new();
        assert_eq!(registry.peek_next_id(), EntryId(1));
        assert_eq!(registry.peek_next_id(), EntryId(1));
    }
}
