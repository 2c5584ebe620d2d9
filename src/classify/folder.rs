//! Folder shape predicates
//!
//! Each predicate looks at most two levels below the folder it is given.
//! Enumeration failures propagate as errors instead of reading as `false`.

use super::kind::{is_image, is_song};
use crate::error::Result;
use crate::fs::{leaf_name, FileEntry, FileSystemGateway};
use std::path::{Path, PathBuf};

/// Folder names starting with one of these mark a disc of a multi-disc album
pub const DISC_PREFIXES: &[&str] = &["CD", "Disc"];

/// Whether a folder name looks like `CD1`, `cd 2`, `Disc1`, `DISC 02`...
pub fn is_disc_folder_name(name: &str) -> bool {
    DISC_PREFIXES.iter().any(|prefix| {
        name.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Songs directly inside `dir`
pub fn folder_songs<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<Vec<FileEntry>> {
    Ok(fs
        .list_files(dir)?
        .into_iter()
        .filter(|f| is_song(&f.extension()))
        .collect())
}

/// Images directly inside `dir`
pub fn folder_images<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<Vec<FileEntry>> {
    Ok(fs
        .list_files(dir)?
        .into_iter()
        .filter(|f| is_image(&f.extension()))
        .collect())
}

pub fn contains_songs<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<bool> {
    Ok(fs.list_files(dir)?.iter().any(|f| is_song(&f.extension())))
}

pub fn contains_albums<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<bool> {
    for child in fs.list_dirs(dir)? {
        if is_album_folder(fs, &child)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// An album either holds songs itself or holds disc folders that do.
pub fn is_album_folder<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<bool> {
    if contains_songs(fs, dir)? {
        return Ok(true);
    }
    album_contains_disc_folders(fs, Some(dir))
}

/// Whether `dir` has a `CD*`/`Disc*` subfolder with songs in it.
/// A missing folder is never a disc container.
pub fn album_contains_disc_folders<G: FileSystemGateway + ?Sized>(
    fs: &G,
    dir: Option<&Path>,
) -> Result<bool> {
    let Some(dir) = dir else {
        return Ok(false);
    };

    for disc in disc_folders(fs, dir)? {
        if contains_songs(fs, &disc)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// No loose songs, and at least one child that is an album in its own right
/// (disc folders don't count).
pub fn is_artist_folder<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<bool> {
    if contains_songs(fs, dir)? {
        return Ok(false);
    }

    for child in fs.list_dirs(dir)? {
        if is_disc_folder_name(&leaf_name(&child)) {
            continue;
        }
        if is_album_folder(fs, &child)? {
            log::debug!("{:?} is an artist folder (album {:?})", dir, child);
            return Ok(true);
        }
    }
    Ok(false)
}

/// A folder of artists, e.g. `Music/` holding `Iron Maiden/`, `Emperor/`...
pub fn is_root_artists_folder<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<bool> {
    if contains_songs(fs, dir)? {
        return Ok(false);
    }
    if contains_albums(fs, dir)? {
        return Ok(false);
    }

    for child in fs.list_dirs(dir)? {
        if is_artist_folder(fs, &child)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Direct subfolders that are albums
pub fn folder_albums<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut albums = Vec::new();
    for child in fs.list_dirs(dir)? {
        if is_album_folder(fs, &child)? {
            albums.push(child);
        }
    }
    Ok(albums)
}

/// Direct subfolders that are artists
pub fn folder_artists<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut artists = Vec::new();
    for child in fs.list_dirs(dir)? {
        if is_artist_folder(fs, &child)? {
            artists.push(child);
        }
    }
    Ok(artists)
}

/// Smallest song of an album, taken from its first disc folder when the album
/// is split into discs.
pub fn any_folder_song<G: FileSystemGateway + ?Sized>(
    fs: &G,
    album: &Path,
) -> Result<Option<FileEntry>> {
    let mut source = album.to_path_buf();
    if album_contains_disc_folders(fs, Some(album))? {
        if let Some(first_disc) = disc_folders(fs, album)?.into_iter().next() {
            source = first_disc;
        }
    }

    Ok(folder_songs(fs, &source)?
        .into_iter()
        .min_by_key(|song| song.len))
}

/// Direct subfolders named like `CD1`/`Disc1`
pub fn disc_folders<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(fs
        .list_dirs(dir)?
        .into_iter()
        .filter(|d| is_disc_folder_name(&leaf_name(d)))
        .collect())
}
