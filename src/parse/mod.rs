//! Free-text name parsing
//!
//! Folder names yield band/album/year, song file names yield
//! track/title/extension. Both parsers run an ordered list of pattern rules
//! under a time budget and report a budget overrun separately from "no rule
//! matched".

mod folder_name;
mod matcher;
mod song_name;

pub use folder_name::FolderNameParser;
pub use matcher::{MatchOutcome, DEFAULT_MATCH_TIMEOUT};
pub use song_name::SongNameParser;

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Replace every run of whitespace with `%20`
pub fn encode_spaces(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, "%20").into_owned()
}
