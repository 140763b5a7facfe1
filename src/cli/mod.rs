// Text menu around the playlist core
// Parsing and rendering live here so main.rs only shuffles lines in and out

use crate::error::PlaylistError;
use crate::playlist::{Entry, EntryId, Playlist};

pub const MENU: &str = "\n--- MENU ---
1. Add Song
2. Display Playlist
3. Play Song
4. Next Song
5. Previous Song
6. Search by Title
7. Delete by Id
8. Reverse Playlist
9. Sort Playlist
10. Shuffle Playlist
11. Display All Songs (by title)
0. Exit
Choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Display,
    Play,
    Next,
    Previous,
    Search,
    Delete,
    Reverse,
    Sort,
    Shuffle,
    DisplayIndex,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim() {
            "1" => MenuChoice::Add,
            "2" => MenuChoice::Display,
            "3" => MenuChoice::Play,
            "4" => MenuChoice::Next,
            "5" => MenuChoice::Previous,
            "6" => MenuChoice::Search,
            "7" => MenuChoice::Delete,
            "8" => MenuChoice::Reverse,
            "9" => MenuChoice::Sort,
            "10" => MenuChoice::Shuffle,
            "11" => MenuChoice::DisplayIndex,
            "0" => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }

    /// Field prompts to collect before the command can run
    pub fn prompts(self) -> &'static [&'static str] {
        match self {
            MenuChoice::Add => &["Title: ", "Artist: "],
            MenuChoice::Search => &["Search title: "],
            MenuChoice::Delete => &["Enter id to delete: "],
            _ => &[],
        }
    }
}

/// A fully collected request, ready for the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { title: String, artist: String },
    Display,
    Play,
    Next,
    Previous,
    Search { title: String },
    Delete { id: EntryId },
    Reverse,
    Sort,
    Shuffle,
    DisplayIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Invalid choice.")]
    InvalidChoice,
    #[error("Invalid id. Please enter a non-negative integer.")]
    InvalidId,
    #[error("Missing input.")]
    MissingField,
    #[error("Invalid input. Lines must be valid UTF-8.")]
    Undecodable,
}

impl Command {
    /// Build a command from a menu choice and the answers to its prompts.
    /// Returns `Ok(None)` for Exit.
    pub fn from_choice(choice: MenuChoice, fields: &[String]) -> Result<Option<Self>, InputError> {
        let field = |i: usize| fields.get(i).cloned().ok_or(InputError::MissingField);

        let command = match choice {
            MenuChoice::Exit => return Ok(None),
            MenuChoice::Add => Command::Add {
                title: field(0)?,
                artist: field(1)?,
            },
            MenuChoice::Search => Command::Search { title: field(0)? },
            MenuChoice::Delete => Command::Delete {
                id: parse_id(&field(0)?).ok_or(InputError::InvalidId)?,
            },
            MenuChoice::Display => Command::Display,
            MenuChoice::Play => Command::Play,
            MenuChoice::Next => Command::Next,
            MenuChoice::Previous => Command::Previous,
            MenuChoice::Reverse => Command::Reverse,
            MenuChoice::Sort => Command::Sort,
            MenuChoice::Shuffle => Command::Shuffle,
            MenuChoice::DisplayIndex => Command::DisplayIndex,
        };
        Ok(Some(command))
    }
}

/// Turn one raw stdin line into text, dropping the line ending.
/// Bytes that are not UTF-8 are rejected here so the core never sees them.
pub fn decode_line(mut raw: Vec<u8>) -> Result<String, InputError> {
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    String::from_utf8(raw).map_err(|_| InputError::Undecodable)
}

/// Digits only, must fit in a u64
pub fn parse_id(input: &str) -> Option<EntryId> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input.parse::<u64>().ok().map(EntryId)
}

pub fn format_entry(entry: &Entry) -> String {
    format!("({}) {} - {}", entry.id, entry.title, entry.artist)
}

fn render_numbered(heading: &str, entries: &[&Entry]) -> String {
    if entries.is_empty() {
        return "Playlist empty.".to_string();
    }

    let mut out = format!("--- {} ---\n", heading);
    for (position, entry) in entries.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", position + 1, format_entry(entry)));
    }
    out.push_str(&format!("Total songs: {}", entries.len()));
    out
}

pub fn render_error(error: &PlaylistError) -> String {
    match error {
        PlaylistError::Duplicate { title, artist } => format!(
            "Cannot add: a song with title \"{}\" and artist \"{}\" already exists.",
            title, artist
        ),
        PlaylistError::InvalidInput { field, value } => {
            format!("Cannot add: {} \"{}\" may only contain letters and spaces.", field, value)
        }
        PlaylistError::NotFound(id) => format!("Song with id {} not found in playlist.", id),
        PlaylistError::EndOfSequence => "End of playlist.".to_string(),
        PlaylistError::NoPrevious => "No previous song.".to_string(),
        PlaylistError::Empty => "No songs to play.".to_string(),
        PlaylistError::OrderMismatch => "Playlist order is out of sync.".to_string(),
    }
}

fn now_playing(result: crate::error::Result<&Entry>) -> String {
    match result {
        Ok(entry) => format!("Now Playing: {}", format_entry(entry)),
        Err(e) => render_error(&e),
    }
}

/// Run one command against the playlist and render the outcome
pub fn execute(playlist: &mut Playlist, command: Command) -> String {
    match command {
        Command::Add { title, artist } => match playlist.add_entry(&title, &artist) {
            Ok(id) => format!("Added: ({}) {} by {}", id, title, artist),
            Err(e) => render_error(&e),
        },
        Command::Display => {
            let heading = format!("Playlist: {}", playlist.name());
            render_numbered(&heading, &playlist.list_all())
        }
        Command::Play => now_playing(playlist.play_current()),
        Command::Next => now_playing(playlist.next()),
        Command::Previous => now_playing(playlist.previous()),
        Command::Search { title } => {
            let matches = playlist.search_by_title(&title);
            if matches.is_empty() {
                return format!("Song not found: {}", title);
            }
            let mut out = format!("Matches for \"{}\":", title);
            for entry in matches {
                out.push('\n');
                out.push_str(&format_entry(entry));
            }
            out
        }
        Command::Delete { id } => match playlist.remove_by_id(id) {
            Ok(entry) => format!("Deleted: {}", format_entry(&entry)),
            Err(e) => render_error(&e),
        },
        Command::Reverse => {
            playlist.reverse();
            "Playlist reversed.".to_string()
        }
        Command::Sort => match playlist.sort_by_title() {
            Ok(()) => "Playlist sorted by title.".to_string(),
            Err(e) => render_error(&e),
        },
        Command::Shuffle => {
            playlist.shuffle();
            "Playlist shuffled.".to_string()
        }
        Command::DisplayIndex => render_numbered("All Songs (by title, id)", &playlist.list_indexed()),
    }
}
