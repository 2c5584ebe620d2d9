//! Folder Sense - music folder classification and name parsing
//!
//! This library works out what each folder of a music library is (root of
//! artists, artist, album, multi-disc album) from the shape of its contents,
//! picks album covers, and pulls band/album/year and track/title out of
//! folder and song file names.

pub mod classify;
pub mod error;
pub mod fs;
pub mod model;
pub mod naming;
pub mod parse;
pub mod scan;

pub use error::{Error, GatewayError, Result};
pub use fs::{FileSystemGateway, LocalFileSystem, MemoryFileSystem};
pub use model::{AlbumType, FolderNameInfo, FolderRole, FolderType, SongNameInfo};
pub use naming::album_name_for_song;
pub use parse::{FolderNameParser, SongNameParser};
pub use scan::{FolderOrganizer, ScanConfig, ScanPipeline, ScanReport};
