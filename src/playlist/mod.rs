// Playlist core - one controller over four structures
// Registry owns the songs, the index sorts/searches them, the sequence is
// the play order, and the stacks remember where you've been.

pub mod entry;
pub mod index;
pub mod navigation;
pub mod sequence;
pub mod validate;

pub use entry::{Entry, EntryId, EntryRegistry};
pub use index::OrderedIndex;
pub use navigation::NavigationStacks;
pub use sequence::SequenceStore;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::PlaylistConfig;
use crate::error::{PlaylistError, Result};

/// A resolved navigation move, decided before anything is mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Next, replaying the top of the forward stack
    Replay(EntryId),
    /// Next, following the play order
    Advance(EntryId),
    /// Previous, popping history
    Back(EntryId),
}

pub struct Playlist {
    name: String,
    registry: EntryRegistry,
    index: OrderedIndex,
    sequence: SequenceStore,
    navigation: NavigationStacks,
    rng: StdRng,
}

impl Playlist {
    /// Empty playlist with an entropy-seeded shuffle
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rng(name.into(), StdRng::from_entropy())
    }

    /// Empty playlist whose shuffles are reproducible
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(name.into(), StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &PlaylistConfig) -> Self {
        match config.shuffle_seed {
            Some(seed) => Self::with_seed(config.name.clone(), seed),
            None => Self::new(config.name.clone()),
        }
    }

    fn with_rng(name: String, rng: StdRng) -> Self {
        Self {
            name,
            registry: EntryRegistry::new(),
            index: OrderedIndex::new(),
            sequence: SequenceStore::new(),
            navigation: NavigationStacks::new(),
            rng,
        }
    }

    /// Add a song at the end of the play order.
    ///
    /// Rejected without touching anything if either field breaks the
    /// letters-and-spaces policy, or if the exact same title and artist are
    /// already in the playlist. A rejected add does not use up an id.
    pub fn add_entry(&mut self, title: &str, artist: &str) -> Result<EntryId> {
        validate::check_field("title", title)?;
        validate::check_field("artist", artist)?;

        let candidate = Entry {
            id: self.registry.peek_next_id(),
            title: title.to_string(),
            artist: artist.to_string(),
        };

        if !self.index.insert(&candidate, &self.registry) {
            debug!("Rejected duplicate '{}' by '{}' in '{}'", title, artist, self.name);
            return Err(PlaylistError::Duplicate {
                title: candidate.title,
                artist: candidate.artist,
            });
        }

        let id = self.registry.commit(candidate.title, candidate.artist);
        self.sequence.append(id);
        self.navigation.clear_forward();

        info!("Added ({}) '{}' by '{}' to playlist '{}'", id, title, artist, self.name);
        Ok(id)
    }

    /// Songs in play order
    pub fn list_all(&self) -> Vec<&Entry> {
        self.resolve(self.sequence.iter())
    }

    /// Songs in index order: title, then id
    pub fn list_indexed(&self) -> Vec<&Entry> {
        self.resolve(self.index.all_in_order())
    }

    pub fn play_current(&self) -> Result<&Entry> {
        self.sequence
            .current()
            .and_then(|id| self.registry.get(id))
            .ok_or(PlaylistError::Empty)
    }

    /// Move forward. Replays an undone step if there is one, otherwise
    /// follows the play order.
    pub fn next(&mut self) -> Result<&Entry> {
        let step = self.plan_next()?;
        self.apply(step);
        self.play_current()
    }

    /// Move back to the most recent history entry
    pub fn previous(&mut self) -> Result<&Entry> {
        let step = self.plan_previous()?;
        self.apply(step);
        self.play_current()
    }

    /// Case-insensitive exact title match, in index order
    pub fn search_by_title(&self, title: &str) -> Vec<&Entry> {
        self.resolve(self.index.search_by_title(title))
    }

    /// Remove a song from every structure, then release it.
    ///
    /// The forward stack survives apart from the removed song itself.
    pub fn remove_by_id(&mut self, id: EntryId) -> Result<Entry> {
        if !self.registry.contains(id) {
            debug!("Remove: no song with id {} in '{}'", id, self.name);
            return Err(PlaylistError::NotFound(id));
        }

        let purged = self.navigation.purge(id);
        if self.sequence.remove(id).is_none() {
            warn!("Remove: ({}) was registered but not in the play order", id);
        }
        if !self.index.remove_by_id(id) {
            warn!("Remove: ({}) was registered but not indexed", id);
        }
        let entry = self.registry.release(id).ok_or(PlaylistError::NotFound(id))?;

        info!(
            "Removed ({}) '{}' by '{}' from playlist '{}' ({} navigation refs purged)",
            entry.id, entry.title, entry.artist, self.name, purged
        );
        Ok(entry)
    }

    pub fn reverse(&mut self) {
        self.sequence.reverse();
        info!("Reversed playlist '{}'", self.name);
    }

    /// Reorder by title using the index's order. Back/forward history is kept.
    pub fn sort_by_title(&mut self) -> Result<()> {
        let order = self.index.all_in_order();
        self.sequence.replace_order(&order)?;
        info!("Sorted playlist '{}' by title", self.name);
        Ok(())
    }

    /// Random reorder. Unlike sort, this throws away the forward stack.
    pub fn shuffle(&mut self) {
        self.sequence.shuffle(&mut self.rng);
        self.navigation.clear_forward();
        info!("Shuffled playlist '{}'", self.name);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn navigation(&self) -> &NavigationStacks {
        &self.navigation
    }

    pub fn index(&self) -> &OrderedIndex {
        &self.index
    }

    pub fn sequence(&self) -> &SequenceStore {
        &self.sequence
    }

    fn plan_next(&self) -> Result<Step> {
        if let Some(&target) = self.navigation.forward().last() {
            return Ok(Step::Replay(target));
        }

        match self.sequence.peek_next() {
            Some(target) => Ok(Step::Advance(target)),
            None => {
                debug!("Next: end of playlist '{}'", self.name);
                Err(PlaylistError::EndOfSequence)
            }
        }
    }

    fn plan_previous(&self) -> Result<Step> {
        match self.navigation.history().last() {
            Some(&target) => Ok(Step::Back(target)),
            None => {
                debug!("Previous: no history in '{}'", self.name);
                Err(PlaylistError::NoPrevious)
            }
        }
    }

    /// The only place the navigation stacks change during back/forward
    fn apply(&mut self, step: Step) {
        let from = self.sequence.current();

        let landed = match step {
            Step::Replay(target) => {
                if let Some(from) = from {
                    self.navigation.push_history(from);
                }
                self.navigation.pop_forward();
                self.sequence.set_current(target).then_some(target)
            }
            Step::Advance(target) => {
                if let Some(from) = from {
                    self.navigation.push_history(from);
                }
                self.sequence.advance().filter(|moved| *moved == target)
            }
            Step::Back(target) => {
                if let Some(from) = from {
                    self.navigation.push_forward(from);
                }
                self.navigation.pop_history();
                self.sequence.set_current(target).then_some(target)
            }
        };

        // stacks are purged on removal, so a planned target is always still linked
        if landed.is_none() {
            warn!("Navigation {:?} from {:?} missed its target in '{}'", step, from, self.name);
        }

        debug!("Navigation {:?} from {:?} in '{}'", step, from, self.name);
    }

    fn resolve<I>(&self, ids: I) -> Vec<&Entry>
    where
        I: IntoIterator<Item = EntryId>,
    {
        ids.into_iter().filter_map(|id| self.registry.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist_with(songs: &[(&str, &str)]) -> (Playlist, Vec<EntryId>) {
        let mut playlist = Playlist::with_seed("Test Mix", 1);
        let ids = songs
            .iter()
            .map(|(title, artist)| playlist.add_entry(title, artist).unwrap())
            .collect();
        (playlist, ids)
    }

    #[test]
    fn test_invalid_input_touches_nothing() {
        let mut playlist = Playlist::with_seed("Test Mix", 1);
        assert!(matches!(
            playlist.add_entry("Song 2", "Blur"),
            Err(PlaylistError::InvalidInput { field: "title", .. })
        ));
        assert!(matches!(
            playlist.add_entry("Song", ""),
            Err(PlaylistError::InvalidInput { field: "artist", .. })
        ));
        assert!(playlist.is_empty());
        assert!(playlist.index().is_empty());
        // no id was consumed
        assert_eq!(playlist.add_entry("Song", "Blur").unwrap(), EntryId(1));
    }

    #[test]
    fn test_duplicate_does_not_consume_an_id() {
        let (mut playlist, ids) = playlist_with(&[("Rain", "Band")]);
        assert_eq!(
            playlist.add_entry("Rain", "Band"),
            Err(PlaylistError::Duplicate {
                title: "Rain".to_string(),
                artist: "Band".to_string()
            })
        );
        let next = playlist.add_entry("Snow", "Band").unwrap();
        assert_eq!(next.get(), ids[0].get() + 1);
    }

    #[test]
    fn test_play_current_on_empty() {
        let mut playlist = Playlist::with_seed("Empty", 1);
        assert_eq!(playlist.play_current(), Err(PlaylistError::Empty));
        assert_eq!(playlist.next().unwrap_err(), PlaylistError::EndOfSequence);
        assert_eq!(playlist.previous().unwrap_err(), PlaylistError::NoPrevious);
        assert!(playlist.list_all().is_empty());
    }

    #[test]
    fn test_next_at_end_changes_nothing() {
        let (mut playlist, ids) = playlist_with(&[("A", "X"), ("B", "Y")]);
        playlist.next().unwrap();
        assert_eq!(playlist.next().unwrap_err(), PlaylistError::EndOfSequence);
        assert_eq!(playlist.play_current().unwrap().id, ids[1]);
        assert_eq!(playlist.navigation().history(), &[ids[0]]);
    }

    #[test]
    fn test_removing_current_moves_cursor_and_purges_stacks() {
        let (mut playlist, ids) = playlist_with(&[("A", "X"), ("B", "Y"), ("C", "Z")]);
        playlist.next().unwrap(); // B, history [A]
        playlist.next().unwrap(); // C, history [A, B]
        playlist.previous().unwrap(); // B, forward [C]

        let removed = playlist.remove_by_id(ids[1]).unwrap();
        assert_eq!(removed.title, "B");
        assert_eq!(playlist.play_current().unwrap().id, ids[2]);
        assert!(!playlist.navigation().contains(ids[1]));
        assert_eq!(playlist.navigation().history(), &[ids[0]]);
        assert_eq!(playlist.navigation().forward(), &[ids[2]]);

        assert_eq!(
            playlist.remove_by_id(ids[1]).unwrap_err(),
            PlaylistError::NotFound(ids[1])
        );
    }

    #[test]
    fn test_sort_keeps_forward_but_shuffle_clears_it() {
        let (mut playlist, ids) = playlist_with(&[("C", "X"), ("A", "Y"), ("B", "Z")]);
        playlist.next().unwrap();
        playlist.previous().unwrap();
        assert_eq!(playlist.navigation().forward(), &[ids[1]]);

        playlist.sort_by_title().unwrap();
        let titles: Vec<&str> = playlist.list_all().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(playlist.play_current().unwrap().title, "A");
        assert_eq!(playlist.navigation().forward(), &[ids[1]]);

        playlist.shuffle();
        assert!(!playlist.navigation().has_forward());
    }

    fn target_of(step: Step) -> EntryId {
        match step {
            Step::Replay(id) | Step::Advance(id) | Step::Back(id) => id,
        }
    }

    #[test]
    fn test_navigation_lands_on_planned_target() {
        let (mut playlist, ids) = playlist_with(&[("A", "X"), ("B", "Y"), ("C", "Z")]);

        let step = playlist.plan_next().unwrap();
        assert_eq!(step, Step::Advance(ids[1]));
        assert_eq!(playlist.next().unwrap().id, target_of(step));

        let step = playlist.plan_previous().unwrap();
        assert_eq!(step, Step::Back(ids[0]));
        assert_eq!(playlist.previous().unwrap().id, target_of(step));

        // after reverse the forward stack still wins over the new order
        playlist.reverse();
        let step = playlist.plan_next().unwrap();
        assert_eq!(step, Step::Replay(ids[1]));
        assert_eq!(playlist.next().unwrap().id, target_of(step));

        let step = playlist.plan_next().unwrap();
        assert_eq!(step, Step::Advance(ids[0]));
        assert_eq!(playlist.next().unwrap().id, target_of(step));
    }

    #[test]
    fn test_remove_clears_every_structure() {
        let (mut playlist, ids) = playlist_with(&[("A", "X"), ("B", "Y")]);
        playlist.remove_by_id(ids[0]).unwrap();

        assert!(!playlist.index().contains(ids[0]));
        assert_eq!(playlist.sequence().to_vec(), vec![ids[1]]);
        assert_eq!(playlist.sequence().current(), Some(ids[1]));
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn test_list_indexed_follows_title_then_id() {
        let (playlist, ids) = playlist_with(&[("Sun", "X"), ("Rain", "Y"), ("Rain", "Z")]);
        let order: Vec<EntryId> = playlist.list_indexed().iter().map(|e| e.id).collect();
        assert_eq!(order, vec![ids[1], ids[2], ids[0]]);
    }
}
