//! Track number / title / extension extraction from song file names

use super::matcher::{first_match, MatchBudget, MatchOutcome, NameRule, DEFAULT_MATCH_TIMEOUT};
use crate::error::{Error, Result};
use crate::model::SongNameInfo;
use once_cell::sync::Lazy;
use regex::Captures;
use std::time::Duration;

// Two digits, then any run of spaces/hyphens/dots, then a title that can't
// start with a separator and runs up to the last dot.
static SONG_RULES: Lazy<Vec<NameRule<SongNameInfo>>> = Lazy::new(|| {
    vec![NameRule::new(
        "track-title-extension",
        r"^\s*(?P<track>[0-9]{2})[\s\-.]*(?P<title>[\wÑñáéíóúÁÉÍÓÚäöüÅÖÜ…,'\&()\[\];‘’´!–](?:[\wÑñáéíóúÁÉÍÓÚäöüÅÖÜ….,'\&()\[\];‘’´!\-–]|\s)*)\.(?P<extension>\w+)",
        song_fields,
    )]
});

fn song_fields(captures: &Captures<'_>) -> SongNameInfo {
    let field = |name: &str| captures.name(name).map(|m| m.as_str()).unwrap_or_default();
    SongNameInfo::new(field("track"), field("title"), field("extension"))
}

/// Why a file name didn't parse, for the error message
fn diagnose(name: &str) -> &'static str {
    let trimmed = name.trim_start();
    if !trimmed.chars().take(2).all(|c| c.is_ascii_digit()) || trimmed.len() < 2 {
        return "missing two-digit track number";
    }

    let after_track = &trimmed[2..];
    let rest = after_track.trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == '.');
    match rest.rfind('.') {
        Some(0) => "missing title",
        Some(_) => "unsupported characters in title",
        None if after_track.contains('.') => "missing title",
        None => "missing file extension",
    }
}

/// Parser for `NN - Title.ext` song file names
#[derive(Debug, Clone, Copy)]
pub struct SongNameParser {
    timeout: Duration,
}

impl Default for SongNameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SongNameParser {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_MATCH_TIMEOUT,
        }
    }

    /// Set the time budget for one parse
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse a song file name. Either every field is found or the call fails.
    pub fn parse(&self, name: &str) -> Result<SongNameInfo> {
        let budget = MatchBudget::start(self.timeout);
        match first_match(&SONG_RULES, name, &budget) {
            MatchOutcome::Matched(info) => Ok(info),
            MatchOutcome::NoMatch => Err(Error::file_name_parse(name, diagnose(name))),
            MatchOutcome::TimedOut => Err(Error::timeout(name, budget.limit())),
        }
    }
}
