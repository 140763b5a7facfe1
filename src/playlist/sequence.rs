// Play order as a doubly linked list over entry ids
// Links live in a map keyed by id, so there are no pointers to dangle

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use super::entry::EntryId;
use crate::error::{PlaylistError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Links {
    prev: Option<EntryId>,
    next: Option<EntryId>,
}

#[derive(Debug, Default)]
pub struct SequenceStore {
    links: HashMap<EntryId, Links>,
    head: Option<EntryId>,
    tail: Option<EntryId>,
    current: Option<EntryId>,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link `id` in at the tail. The first entry also becomes head and current.
    pub fn append(&mut self, id: EntryId) {
        if self.links.contains_key(&id) {
            return;
        }

        match self.tail {
            None => {
                self.links.insert(id, Links::default());
                self.head = Some(id);
                self.tail = Some(id);
                self.current = Some(id);
            }
            Some(tail) => {
                self.links.insert(id, Links { prev: Some(tail), next: None });
                if let Some(tail_links) = self.links.get_mut(&tail) {
                    tail_links.next = Some(id);
                }
                self.tail = Some(id);
            }
        }
    }

    /// Splice `id` out. If it was current, current moves to its successor,
    /// or to the new head when it was the tail.
    pub fn remove(&mut self, id: EntryId) -> Option<EntryId> {
        let Links { prev, next } = self.links.remove(&id)?;

        match prev {
            Some(prev) => {
                if let Some(links) = self.links.get_mut(&prev) {
                    links.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next) => {
                if let Some(links) = self.links.get_mut(&next) {
                    links.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if self.current == Some(id) {
            self.current = next.or(self.head);
        }

        Some(id)
    }

    /// Flip every link. Current goes to the new head.
    pub fn reverse(&mut self) {
        for links in self.links.values_mut() {
            std::mem::swap(&mut links.prev, &mut links.next);
        }
        std::mem::swap(&mut self.head, &mut self.tail);
        self.current = self.head;
    }

    /// Relink everything to follow `order`, which must be a permutation of
    /// the stored ids. Current goes to the new head.
    pub fn replace_order(&mut self, order: &[EntryId]) -> Result<()> {
        if order.len() != self.links.len() {
            return Err(PlaylistError::OrderMismatch);
        }
        let mut seen = HashSet::with_capacity(order.len());
        if !order.iter().all(|id| self.links.contains_key(id) && seen.insert(*id)) {
            return Err(PlaylistError::OrderMismatch);
        }

        for (position, id) in order.iter().enumerate() {
            let links = Links {
                prev: position.checked_sub(1).map(|p| order[p]),
                next: order.get(position + 1).copied(),
            };
            self.links.insert(*id, links);
        }

        self.head = order.first().copied();
        self.tail = order.last().copied();
        self.current = self.head;
        Ok(())
    }

    /// Uniformly random permutation (Fisher-Yates). Current goes to the new head.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut order = self.to_vec();
        order.shuffle(rng);
        let relinked = self.replace_order(&order);
        debug_assert!(relinked.is_ok(), "shuffled order is a permutation of the stored ids");
    }

    /// Step current forward. `None` at the tail, with current left in place.
    pub fn advance(&mut self) -> Option<EntryId> {
        let next = self.peek_next()?;
        self.current = Some(next);
        Some(next)
    }

    /// Step current backward. `None` at the head, with current left in place.
    pub fn retreat(&mut self) -> Option<EntryId> {
        let prev = self.peek_prev()?;
        self.current = Some(prev);
        Some(prev)
    }

    /// What `advance` would move to, without moving
    pub fn peek_next(&self) -> Option<EntryId> {
        self.links.get(&self.current?)?.next
    }

    pub fn peek_prev(&self) -> Option<EntryId> {
        self.links.get(&self.current?)?.prev
    }

    /// Point current at a stored entry. Returns false if `id` isn't stored.
    pub fn set_current(&mut self, id: EntryId) -> bool {
        if !self.links.contains_key(&id) {
            return false;
        }
        self.current = Some(id);
        true
    }

    pub fn current(&self) -> Option<EntryId> {
        self.current
    }

    pub fn head(&self) -> Option<EntryId> {
        self.head
    }

    pub fn tail(&self) -> Option<EntryId> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            store: self,
            cursor: self.head,
        }
    }

    pub fn to_vec(&self) -> Vec<EntryId> {
        self.iter().collect()
    }

    /// Walk tail to head via `prev` links
    pub fn iter_rev(&self) -> impl Iterator<Item = EntryId> + '_ {
        std::iter::successors(self.tail, move |id| self.links.get(id).and_then(|l| l.prev))
    }
}

pub struct Iter<'a> {
    store: &'a SequenceStore,
    cursor: Option<EntryId>,
}

impl Iterator for Iter<'_> {
    type Item = EntryId;

    fn next(&mut self) -> Option<EntryId> {
        let id = self.cursor?;
        self.cursor = self.store.links.get(&id).and_then(|links| links.next);
        Some(id)
    }
}
