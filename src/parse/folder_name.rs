//! Band / album / year extraction from folder names
//!
//! Folder names follow no single convention. With a year somewhere in the
//! name the rules are tried in this order:
//!
//! 1. `1994 - In the Nightside Eclipse` (year first, anchored at the start)
//! 2. `Spirit Adrift - Divided by Darkness (2019)` (band, album, trailing year)
//! 3. `Emperor - 1994 - In the Nightside Eclipse` (band, year, album)
//!
//! Without a year only `Band - Album` is tried, and a name that doesn't fit
//! is taken whole as the album.

use super::matcher::{first_match, probe, MatchBudget, MatchOutcome, NameRule, DEFAULT_MATCH_TIMEOUT};
use crate::error::{Error, Result};
use crate::model::FolderNameInfo;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::time::Duration;

static YEAR_PROBE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([0-9]{4})\)|([0-9]{4})").expect("year probe pattern is valid")
});

// Band names: letters, accents, dots/ellipsis, comma, apostrophe, ampersand
const BAND: &str = r"[\wÑñáéíóúÁÉÍÓÚäöüÅÖÜ….,'\&]";
// Album after a year prefix may carry brackets: "Live (Tokyo '92) [Remaster]"
const ALBUM_AFTER_YEAR: &str = r"[\wÑñáéíóúÁÉÍÓÚäöüÅÖÜ…,'\&()\[\]\-\.]";
// Album between a band and a trailing/leading year
const ALBUM_WITH_YEAR: &str = r"[\wÑñáéíóúÁÉÍÓÚäöüÅÖÜ…,'\&\^\-()\.]";
// Album after a band, no year anywhere
const ALBUM_NO_YEAR: &str = r"[\wÑñáéíóúÁÉÍÓÚäöüÅÖÜ…,'\&()\-]";

static YEAR_RULES: Lazy<Vec<NameRule<FolderNameInfo>>> = Lazy::new(|| {
    vec![
        NameRule::new(
            "year-album",
            &format!(r"^(?P<year>[0-9]{{4}})\)*\s*-*\s*(?P<album>(?:{ALBUM_AFTER_YEAR}+\s?)+)"),
            named_fields,
        ),
        NameRule::new(
            "band-album-year",
            &format!(
                r"(?P<band>(?:{BAND}+\s?)+)\s*-\s*(?P<album>(?:{ALBUM_WITH_YEAR}+\s?)+) [\(\[]*(?P<year>[0-9]{{4}})[\)\]]*"
            ),
            named_fields,
        ),
        NameRule::new(
            "band-year-album",
            &format!(
                r"(?P<band>(?:{BAND}+\s?)+)\s*-\s*\(*(?P<year>[0-9]{{4}})\)*\s*-\s*(?P<album>(?:{ALBUM_WITH_YEAR}+\s?)+)"
            ),
            named_fields,
        ),
    ]
});

static NO_YEAR_RULES: Lazy<Vec<NameRule<FolderNameInfo>>> = Lazy::new(|| {
    vec![NameRule::new(
        "band-album",
        &format!(r"^(?P<band>(?:{BAND}+\s?)+)\s*-\s*(?P<album>(?:{ALBUM_NO_YEAR}+\s?)+)"),
        named_fields,
    )]
});

/// Captured segments never end in whitespace
fn named_fields(captures: &Captures<'_>) -> FolderNameInfo {
    let field = |name: &str| {
        captures
            .name(name)
            .map(|m| m.as_str().trim_end().to_string())
            .unwrap_or_default()
    };
    FolderNameInfo {
        band: field("band"),
        album: field("album"),
        year: field("year"),
    }
}

/// Parser for album and artist folder names
#[derive(Debug, Clone, Copy)]
pub struct FolderNameParser {
    timeout: Duration,
}

impl Default for FolderNameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FolderNameParser {
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

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the name carries a four-digit year, bare or in parentheses
    pub fn has_year(&self, name: &str) -> Result<bool> {
        let budget = MatchBudget::start(self.timeout);
        match probe(&YEAR_PROBE, name, &budget) {
            MatchOutcome::Matched(()) => Ok(true),
            MatchOutcome::NoMatch => Ok(false),
            MatchOutcome::TimedOut => Err(Error::timeout(name, budget.limit())),
        }
    }

    /// Run the rule chain that applies to `name` and report the raw outcome,
    /// before any fallback is applied.
    pub fn try_parse(&self, name: &str) -> MatchOutcome<FolderNameInfo> {
        let budget = MatchBudget::start(self.timeout);
        match probe(&YEAR_PROBE, name, &budget) {
            MatchOutcome::Matched(()) => first_match(&YEAR_RULES, name, &budget),
            MatchOutcome::NoMatch => first_match(&NO_YEAR_RULES, name, &budget),
            MatchOutcome::TimedOut => MatchOutcome::TimedOut,
        }
    }

    /// Parse a folder name into band, album and year.
    ///
    /// A name with a year that fits no rule yields an empty record. A name
    /// without a year that fits no rule becomes the album as-is.
    pub fn parse(&self, name: &str) -> Result<FolderNameInfo> {
        let budget = MatchBudget::start(self.timeout);

        let has_year = match probe(&YEAR_PROBE, name, &budget) {
            MatchOutcome::Matched(()) => true,
            MatchOutcome::NoMatch => false,
            MatchOutcome::TimedOut => return Err(Error::timeout(name, budget.limit())),
        };

        let rules: &[NameRule<FolderNameInfo>] = if has_year { &YEAR_RULES } else { &NO_YEAR_RULES };

        match first_match(rules, name, &budget) {
            MatchOutcome::Matched(info) => Ok(info),
            MatchOutcome::NoMatch if has_year => {
                log::debug!("Folder name {:?} has a year but fits no known pattern", name);
                Ok(FolderNameInfo::default())
            }
            MatchOutcome::NoMatch => Ok(FolderNameInfo::album_only(name)),
            MatchOutcome::TimedOut => Err(Error::timeout(name, budget.limit())),
        }
    }
}
