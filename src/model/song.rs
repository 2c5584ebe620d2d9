use serde::{Deserialize, Serialize};

/// Track number, title and extension recovered from a song file name.
/// Every field is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongNameInfo {
    /// Two digits, kept as text ("01")
    pub track_number: String,

    pub title: String,

    /// Without the leading dot
    pub extension: String,
}

impl SongNameInfo {
    pub fn new(
        track_number: impl Into<String>,
        title: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            track_number: track_number.into(),
            title: title.into(),
            extension: extension.into(),
        }
    }

    /// Track number as an integer
    pub fn track(&self) -> Option<u32> {
        self.track_number.parse().ok()
    }
}
