//! Scan configuration

use crate::parse::DEFAULT_MATCH_TIMEOUT;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a library scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Folder the scan starts from (e.g., ~/Music/Bands)
    pub root: PathBuf,

    /// How far below the root to descend (None = whole tree, 0 = root only)
    pub max_depth: Option<usize>,

    /// Time budget for each folder or song name parse
    pub match_timeout: Duration,

    /// Whether to parse song file names inside album folders
    pub parse_songs: bool,
}

impl ScanConfig {
    /// Create a new scan configuration
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            max_depth: None,
            match_timeout: DEFAULT_MATCH_TIMEOUT,
            parse_songs: true,
        }
    }

    /// Limit how deep the scan descends
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set the name matching budget
    pub fn with_match_timeout(mut self, timeout: Duration) -> Self {
        self.match_timeout = timeout;
        self
    }

    /// Skip song file names, only classify folders
    pub fn without_songs(mut self) -> Self {
        self.parse_songs = false;
        self
    }
}
