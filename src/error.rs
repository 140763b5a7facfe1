// Error types for the playlist core
// Every variant is recoverable - the caller reports it and carries on

use crate::playlist::EntryId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaylistError {
    #[error("a song titled \"{title}\" by \"{artist}\" already exists")]
    Duplicate { title: String, artist: String },

    #[error("invalid {field} \"{value}\": only letters and spaces are allowed")]
    InvalidInput { field: &'static str, value: String },

    #[error("no song with id {0}")]
    NotFound(EntryId),

    #[error("end of playlist")]
    EndOfSequence,

    #[error("no previous song")]
    NoPrevious,

    #[error("playlist is empty")]
    Empty,

    #[error("new order does not match the songs in the playlist")]
    OrderMismatch,
}

pub type Result<T> = std::result::Result<T, PlaylistError>;
