use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of music folder a directory is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FolderType {
    /// Songs directly inside the folder
    Album,

    /// Songs split across `CD1`/`Disc1`... subfolders
    AlbumWithMultipleCDs,

    /// No songs of its own, one album per subfolder
    ArtistWithAlbums,
}

/// Role of a folder within a whole library tree.
///
/// Unlike [`FolderType`] this covers every folder: root-of-artists folders and
/// folders that fit no pattern get a role too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FolderRole {
    RootArtists,
    Artist,
    Album,
    MultiDiscAlbum,
    Unclassified,
}

impl FolderRole {
    /// Album-shaped roles carry album names, covers and songs
    pub fn is_album(&self) -> bool {
        matches!(self, FolderRole::Album | FolderRole::MultiDiscAlbum)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FolderRole::RootArtists => "root of artists",
            FolderRole::Artist => "artist",
            FolderRole::Album => "album",
            FolderRole::MultiDiscAlbum => "multi-disc album",
            FolderRole::Unclassified => "unclassified",
        }
    }
}

impl From<FolderType> for FolderRole {
    fn from(folder_type: FolderType) -> Self {
        match folder_type {
            FolderType::Album => FolderRole::Album,
            FolderType::AlbumWithMultipleCDs => FolderRole::MultiDiscAlbum,
            FolderType::ArtistWithAlbums => FolderRole::Artist,
        }
    }
}

impl fmt::Display for FolderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Band, album and year recovered from a folder name.
/// Missing parts are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNameInfo {
    pub band: String,
    pub album: String,
    /// Four digits, or empty
    pub year: String,
}

impl FolderNameInfo {
    pub fn new(band: impl Into<String>, album: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            band: band.into(),
            album: album.into(),
            year: year.into(),
        }
    }

    /// Only the album is known
    pub fn album_only(album: impl Into<String>) -> Self {
        Self {
            album: album.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.band.is_empty() && self.album.is_empty() && self.year.is_empty()
    }
}

/// Release kind hinted at by markers like `(EP)` or `[Demo]` in a folder name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlbumType {
    FullAlbum,
    EP,
    Demo,
    Single,
    Split,
}

impl AlbumType {
    /// Marked types, in the order markers are checked
    const MARKED: [AlbumType; 4] = [AlbumType::EP, AlbumType::Demo, AlbumType::Single, AlbumType::Split];

    /// Detect the release kind from `(Marker)`/`[Marker]` in `name`.
    /// Markers are case-sensitive; no marker means a full album.
    pub fn from_folder_name(name: &str) -> Self {
        Self::MARKED
            .into_iter()
            .find(|kind| {
                let marker = kind.name();
                name.contains(&format!("({marker})")) || name.contains(&format!("[{marker}]"))
            })
            .unwrap_or(AlbumType::FullAlbum)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AlbumType::FullAlbum => "FullAlbum",
            AlbumType::EP => "EP",
            AlbumType::Demo => "Demo",
            AlbumType::Single => "Single",
            AlbumType::Split => "Split",
        }
    }
}

impl fmt::Display for AlbumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
