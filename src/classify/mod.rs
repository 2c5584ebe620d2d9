//! Folder classification
//!
//! Decides what a folder is (album, multi-disc album, artist, root of
//! artists) purely from the shape of its contents.

pub mod cover;
pub mod folder;
pub mod kind;
pub mod resolver;

pub use cover::{is_canonical_cover_name, resolve_cover, COVER_FILE_NAME};
pub use folder::{
    album_contains_disc_folders, any_folder_song, contains_albums, contains_songs, disc_folders,
    folder_albums, folder_artists, folder_images, folder_songs, is_album_folder,
    is_artist_folder, is_disc_folder_name, is_root_artists_folder,
};
pub use kind::{is_image, is_song, FileKind};
pub use resolver::{classify_role, resolve_folder_type};
