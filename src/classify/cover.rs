//! Album cover selection

use super::folder::{folder_images, is_album_folder};
use crate::error::Result;
use crate::fs::{FileEntry, FileSystemGateway};
use std::path::Path;

/// Name a saved cover image is written under
pub const COVER_FILE_NAME: &str = "FRONT.jpg";

/// Cover file names (upper-cased) that win over any other image
pub const COVER_IMAGE_NAMES: &[&str] = &["FRONT.JPG", "FOLDER.JPG"];

/// Whether `name` is one of the canonical cover file names, ignoring case
pub fn is_canonical_cover_name(name: &str) -> bool {
    let upper = name.to_uppercase();
    COVER_IMAGE_NAMES.contains(&upper.as_str())
}

/// Pick the cover image of an album folder.
///
/// A `FRONT.jpg`/`FOLDER.jpg` always wins. Otherwise hidden/system images are
/// ignored and a lone remaining image is the cover. Non-album folders and
/// ambiguous folders have no cover.
pub fn resolve_cover<G: FileSystemGateway + ?Sized>(
    fs: &G,
    dir: &Path,
) -> Result<Option<FileEntry>> {
    find_cover(fs, dir).map_err(|e| e.into_cover_error(dir))
}

fn find_cover<G: FileSystemGateway + ?Sized>(fs: &G, dir: &Path) -> Result<Option<FileEntry>> {
    if !is_album_folder(fs, dir)? {
        return Ok(None);
    }

    let images = folder_images(fs, dir)?;

    if let Some(cover) = images.iter().find(|img| is_canonical_cover_name(&img.name())) {
        return Ok(Some(cover.clone()));
    }

    let mut visible = images.into_iter().filter(|img| !img.hidden);
    match (visible.next(), visible.next()) {
        (Some(only), None) => Ok(Some(only)),
        (None, _) => {
            log::debug!("No cover image in {:?}", dir);
            Ok(None)
        }
        (Some(_), Some(_)) => {
            log::debug!("Several candidate cover images in {:?}, none picked", dir);
            Ok(None)
        }
    }
}
