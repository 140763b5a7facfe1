// Setlist Library - in-memory playlist core plus the text menu around it
// The core keeps a title index, the play order and back/forward stacks in sync

pub mod cli;      // menu parsing and rendering
pub mod config;   // settings and preferences
pub mod error;    // recoverable playlist errors
pub mod playlist; // registry, index, sequence, navigation, controller

// Export the stuff other modules actually use
pub use config::Config;
pub use error::{PlaylistError, Result};
pub use playlist::{Entry, EntryId, Playlist};
