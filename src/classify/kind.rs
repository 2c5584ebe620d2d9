//! File kind detection by extension

use serde::Serialize;
use std::path::Path;

/// Extensions treated as songs
pub const SONG_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "wma"];

/// Extensions treated as images
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpe", "bmp", "png"];

/// What a single directory entry is, judging by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileKind {
    Song,
    Image,
    Other,
}

impl FileKind {
    /// Classify an extension. Case-insensitive, leading dot optional.
    pub fn from_extension(extension: &str) -> Self {
        let ext = extension.strip_prefix('.').unwrap_or(extension);
        if SONG_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)) {
            FileKind::Song
        } else if IMAGE_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)) {
            FileKind::Image
        } else {
            FileKind::Other
        }
    }

    pub fn of_path(path: &Path) -> Self {
        path.extension()
            .map(|e| Self::from_extension(&e.to_string_lossy()))
            .unwrap_or(FileKind::Other)
    }
}

pub fn is_song(extension: &str) -> bool {
    FileKind::from_extension(extension) == FileKind::Song
}

pub fn is_image(extension: &str) -> bool {
    FileKind::from_extension(extension) == FileKind::Image
}
