//! Scan results

use crate::fs::FileEntry;
use crate::model::{AlbumType, FolderNameInfo, FolderRole, SongNameInfo};
use serde::Serialize;
use std::path::PathBuf;

/// Everything a scan found under its root
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,

    /// When the scan finished (RFC 3339)
    pub scanned_at: String,

    /// One entry per folder, sorted by path
    pub folders: Vec<FolderReport>,

    pub counts: RoleCounts,
}

impl ScanReport {
    pub fn new(root: PathBuf, mut folders: Vec<FolderReport>) -> Self {
        folders.sort_by(|a, b| a.path.cmp(&b.path));
        let counts = RoleCounts::tally(&folders);
        Self {
            root,
            scanned_at: chrono::Local::now().to_rfc3339(),
            folders,
            counts,
        }
    }

    /// Folders with an album-shaped role
    pub fn albums(&self) -> impl Iterator<Item = &FolderReport> {
        self.folders.iter().filter(|f| f.role.is_album())
    }

    pub fn folder(&self, path: &std::path::Path) -> Option<&FolderReport> {
        self.folders.iter().find(|f| f.path == path)
    }

    /// Song file names that didn't parse, across all folders
    pub fn song_failures(&self) -> usize {
        self.folders
            .iter()
            .flat_map(|f| &f.songs)
            .filter(|s| s.error.is_some())
            .count()
    }
}

/// What a scan learnt about one folder
#[derive(Debug, Clone, Serialize)]
pub struct FolderReport {
    pub path: PathBuf,
    pub role: FolderRole,

    /// Album folders only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FolderNameInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_type: Option<AlbumType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<FileEntry>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub songs: Vec<SongReport>,
}

impl FolderReport {
    pub fn new(path: PathBuf, role: FolderRole) -> Self {
        Self {
            path,
            role,
            name: None,
            album_type: None,
            cover: None,
            songs: Vec::new(),
        }
    }
}

/// Parse result for one song file
#[derive(Debug, Clone, Serialize)]
pub struct SongReport {
    pub file_name: String,

    /// Disc folder the song sits in, for multi-disc albums
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<SongNameInfo>,

    /// Why the name didn't parse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Number of folders per role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub root_artists: usize,
    pub artists: usize,
    pub albums: usize,
    pub multi_disc_albums: usize,
    pub unclassified: usize,
}

impl RoleCounts {
    fn tally(folders: &[FolderReport]) -> Self {
        let mut counts = Self::default();
        for folder in folders {
            let slot = match folder.role {
                FolderRole::RootArtists => &mut counts.root_artists,
                FolderRole::Artist => &mut counts.artists,
                FolderRole::Album => &mut counts.albums,
                FolderRole::MultiDiscAlbum => &mut counts.multi_disc_albums,
                FolderRole::Unclassified => &mut counts.unclassified,
            };
            *slot += 1;
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.root_artists + self.artists + self.albums + self.multi_disc_albums + self.unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_sorts_and_counts() {
        let folders = vec![
            FolderReport::new(PathBuf::from("/m/b"), FolderRole::Album),
            FolderReport::new(PathBuf::from("/m"), FolderRole::RootArtists),
            FolderReport::new(PathBuf::from("/m/a"), FolderRole::Album),
        ];
        let report = ScanReport::new(PathBuf::from("/m"), folders);

        let paths: Vec<_> = report.folders.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("/m"), PathBuf::from("/m/a"), PathBuf::from("/m/b")]
        );
        assert_eq!(report.counts.albums, 2);
        assert_eq!(report.counts.root_artists, 1);
        assert_eq!(report.counts.total(), 3);
        assert_eq!(report.albums().count(), 2);
        assert!(chrono::DateTime::parse_from_rfc3339(&report.scanned_at).is_ok());
    }

    #[test]
    fn test_non_album_fields_are_omitted_from_json() {
        let folder = FolderReport::new(PathBuf::from("/m"), FolderRole::Artist);
        let json = serde_json::to_value(&folder).unwrap();
        assert_eq!(json["role"], "artist");
        assert!(json.get("name").is_none());
        assert!(json.get("songs").is_none());
    }
}
