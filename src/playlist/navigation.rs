use super::entry::EntryId;

/// Back/forward stacks. Both hold ids only and must be purged on removal.
#[derive(Debug, Default)]
pub struct NavigationStacks {
    history: Vec<EntryId>,
    forward: Vec<EntryId>,
}

impl NavigationStacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_history(&mut self, id: EntryId) {
        self.history.push(id);
    }

    pub fn pop_history(&mut self) -> Option<EntryId> {
        self.history.pop()
    }

    pub fn push_forward(&mut self, id: EntryId) {
        self.forward.push(id);
    }

    pub fn pop_forward(&mut self) -> Option<EntryId> {
        self.forward.pop()
    }

    /// Remove every occurrence of `id` from both stacks, keeping the order
    /// of what remains. Returns how many references were dropped.
    pub fn purge(&mut self, id: EntryId) -> usize {
        let before = self.history.len() + self.forward.len();
        self.history.retain(|held| *held != id);
        self.forward.retain(|held| *held != id);
        before - (self.history.len() + self.forward.len())
    }

    pub fn clear_forward(&mut self) {
        self.forward.clear();
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.history.contains(&id) || self.forward.contains(&id)
    }

    /// Oldest first, top of stack last
    pub fn history(&self) -> &[EntryId] {
        &self.history
    }

    pub fn forward(&self) -> &[EntryId] {
        &self.forward
    }

    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn has_forward(&self) -> bool {
        !self.forward.is_empty()
    }
}
