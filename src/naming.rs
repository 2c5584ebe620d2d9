//! Album naming for song files
//!
//! Works out which album a song belongs to from where it sits in the tree,
//! stepping over `CD1`/`Disc1` folders.

use crate::classify::{album_contains_disc_folders, is_album_folder};
use crate::error::Result;
use crate::fs::{leaf_name, FileSystemGateway};
use crate::parse::FolderNameParser;
use std::path::Path;

/// Album name of the folder holding `song`.
///
/// When the song's grandparent is a multi-disc album, the grandparent's name
/// is used; otherwise the song's own folder must be an album. Returns `None`
/// when the song has no folder or grandparent, or no album folder applies.
pub fn album_name_for_song<G: FileSystemGateway + ?Sized>(
    fs: &G,
    parser: &FolderNameParser,
    song: &Path,
) -> Result<Option<String>> {
    let Some(dir) = non_empty_parent(song) else {
        return Ok(None);
    };
    let Some(parent) = non_empty_parent(dir) else {
        return Ok(None);
    };

    let album_dir = if album_contains_disc_folders(fs, Some(parent))? {
        parent
    } else if is_album_folder(fs, dir)? {
        dir
    } else {
        log::debug!("{:?} isn't inside an album folder", song);
        return Ok(None);
    };

    let info = parser.parse(&leaf_name(album_dir))?;
    Ok(Some(info.album))
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}
