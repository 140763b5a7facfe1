// Allowed-character policy for titles and artists: letters and spaces,
// at least one letter

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PlaylistError, Result};

static LETTERS_AND_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ *[A-Za-z][A-Za-z ]*$").expect("static pattern compiles"));

pub fn is_letters_and_spaces(text: &str) -> bool {
    LETTERS_AND_SPACES.is_match(text)
}

pub fn check_field(field: &'static str, value: &str) -> Result<()> {
    if is_letters_and_spaces(value) {
        Ok(())
    } else {
        Err(PlaylistError::InvalidInput {
            field,
            value: value.to_string(),
        })
    }
}
