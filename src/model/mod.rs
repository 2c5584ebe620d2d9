//! Plain data produced by classification and name parsing
//!
//! Nothing in here touches the filesystem; every value is derived fresh on
//! each call.

mod folder;
mod song;

pub use folder::{AlbumType, FolderNameInfo, FolderRole, FolderType};
pub use song::SongNameInfo;
