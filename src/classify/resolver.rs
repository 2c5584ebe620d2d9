//! Folder type resolution

use super::folder::{
    album_contains_disc_folders, is_album_folder, is_artist_folder, is_root_artists_folder,
};
use crate::error::{Error, Result};
use crate::fs::FileSystemGateway;
use crate::model::{FolderRole, FolderType};
use std::path::Path;

/// Resolve a folder to one of the three folder types.
///
/// Checks run in priority order: artist, then multi-disc album, then plain
/// album. Anything else, root-of-artists folders included, is a
/// [`Error::Classification`].
pub fn resolve_folder_type<G: FileSystemGateway + ?Sized>(
    fs: &G,
    dir: &Path,
) -> Result<FolderType> {
    if is_artist_folder(fs, dir)? {
        return Ok(FolderType::ArtistWithAlbums);
    }

    if album_contains_disc_folders(fs, Some(dir))? {
        return Ok(FolderType::AlbumWithMultipleCDs);
    }

    if is_album_folder(fs, dir)? {
        return Ok(FolderType::Album);
    }

    Err(Error::classification(dir))
}

/// Five-way role of a folder inside a library tree.
///
/// Falls back to the root-of-artists predicate when [`resolve_folder_type`]
/// rejects the folder.
pub fn classify_role<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<FolderRole> {
    match resolve_folder_type(fs, dir) {
        Ok(folder_type) => Ok(folder_type.into()),
        Err(Error::Classification { .. }) => {
            if is_root_artists_folder(fs, dir)? {
                Ok(FolderRole::RootArtists)
            } else {
                Ok(FolderRole::Unclassified)
            }
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::test_support::*;
    use crate::fs::MemoryFileSystem;

    #[test]
    fn test_resolve_folder_type() {
        let fs = library();
        assert_eq!(resolve_folder_type(&fs, normal_album()).unwrap(), FolderType::Album);
        assert_eq!(resolve_folder_type(&fs, weird_album()).unwrap(), FolderType::Album);
        assert_eq!(
            resolve_folder_type(&fs, multi_disc_album()).unwrap(),
            FolderType::AlbumWithMultipleCDs
        );
        assert_eq!(
            resolve_folder_type(&fs, disc_album()).unwrap(),
            FolderType::AlbumWithMultipleCDs
        );
        assert_eq!(
            resolve_folder_type(&fs, band()).unwrap(),
            FolderType::ArtistWithAlbums
        );
    }

    #[test]
    fn test_root_artists_folder_is_rejected() {
        let fs = library();
        match resolve_folder_type(&fs, root()) {
            Err(Error::Classification { path }) => assert_eq!(path, root()),
            other => panic!("expected classification error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_folder_is_rejected() {
        let fs = MemoryFileSystem::new().with_dir("/empty");
        assert!(matches!(
            resolve_folder_type(&fs, Path::new("/empty")),
            Err(Error::Classification { .. })
        ));
    }

    #[test]
    fn test_disc_album_with_loose_songs_is_multi_disc() {
        let fs = MemoryFileSystem::new()
            .with_file("/a/00 - intro.mp3", 1)
            .with_file("/a/CD1/01 - x.mp3", 1);
        assert_eq!(
            resolve_folder_type(&fs, Path::new("/a")).unwrap(),
            FolderType::AlbumWithMultipleCDs
        );
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let fs = library();
        for dir in [normal_album(), multi_disc_album(), band()] {
            let first = resolve_folder_type(&fs, dir).unwrap();
            let second = resolve_folder_type(&fs, dir).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_classify_role() {
        let fs = library().with_dir("/empty");
        assert_eq!(classify_role(&fs, normal_album()).unwrap(), FolderRole::Album);
        assert_eq!(
            classify_role(&fs, multi_disc_album()).unwrap(),
            FolderRole::MultiDiscAlbum
        );
        assert_eq!(classify_role(&fs, band()).unwrap(), FolderRole::Artist);
        assert_eq!(classify_role(&fs, root()).unwrap(), FolderRole::RootArtists);
        assert_eq!(
            classify_role(&fs, Path::new("/empty")).unwrap(),
            FolderRole::Unclassified
        );
    }

    #[test]
    fn test_classify_role_propagates_gateway_errors() {
        let fs = MemoryFileSystem::new().with_broken_dir("/broken");
        assert!(matches!(
            classify_role(&fs, Path::new("/broken")),
            Err(Error::Gateway(_))
        ));
    }
}
