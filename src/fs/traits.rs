//! Filesystem gateway trait and file handle

use crate::error::GatewayError;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Result of a gateway call
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// A file as seen by the gateway at enumeration time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Full path to the file
    pub path: PathBuf,

    /// Size in bytes
    pub len: u64,

    /// Read-only attribute
    pub read_only: bool,

    /// Hidden or system file (thumbnail caches and the like)
    pub hidden: bool,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            len: 0,
            read_only: false,
            hidden: false,
        }
    }

    /// File name including extension
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extension without the leading dot, empty when there is none
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory holding the file
    pub fn directory(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

/// Capability set the classifier and folder operations need from a filesystem.
///
/// Listings come back sorted by name.
pub trait FileSystemGateway {
    /// Whether `path` exists and is a directory
    fn dir_exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents
    fn create_dir_all(&self, path: &Path) -> GatewayResult<()>;

    /// Direct child directories of `path`
    fn list_dirs(&self, path: &Path) -> GatewayResult<Vec<PathBuf>>;

    /// Direct files of `path`
    fn list_files(&self, path: &Path) -> GatewayResult<Vec<FileEntry>>;

    /// Current state of a single file
    fn file_entry(&self, path: &Path) -> GatewayResult<FileEntry>;

    /// Copy a file, overwriting the destination
    fn copy_file(&self, from: &Path, to: &Path) -> GatewayResult<()>;

    /// Move or rename a file or directory
    fn move_path(&self, from: &Path, to: &Path) -> GatewayResult<()>;

    /// Open a file for exclusive read/write and close it again.
    /// An error means another process holds the file.
    fn open_exclusive(&self, path: &Path) -> GatewayResult<()>;

    fn set_read_only(&self, path: &Path, read_only: bool) -> GatewayResult<()>;

    /// Byte sink for a brand new file; fails with `AlreadyExists` instead of
    /// overwriting.
    fn create_new(&self, path: &Path) -> GatewayResult<Box<dyn Write + '_>>;

    /// `root` and every directory below it, parents before children.
    /// `max_depth` counts `root` as depth 0.
    fn walk_dirs(&self, root: &Path, max_depth: Option<usize>) -> GatewayResult<Vec<PathBuf>> {
        let mut found = vec![root.to_path_buf()];
        let mut frontier = vec![(root.to_path_buf(), 0usize)];

        while let Some((dir, depth)) = frontier.pop() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            for child in self.list_dirs(&dir)? {
                found.push(child.clone());
                frontier.push((child, depth + 1));
            }
        }

        Ok(found)
    }
}

impl<G: FileSystemGateway + ?Sized> FileSystemGateway for &G {
    fn dir_exists(&self, path: &Path) -> bool {
        (**self).dir_exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> GatewayResult<()> {
        (**self).create_dir_all(path)
    }

    fn list_dirs(&self, path: &Path) -> GatewayResult<Vec<PathBuf>> {
        (**self).list_dirs(path)
    }

    fn list_files(&self, path: &Path) -> GatewayResult<Vec<FileEntry>> {
        (**self).list_files(path)
    }

    fn file_entry(&self, path: &Path) -> GatewayResult<FileEntry> {
        (**self).file_entry(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> GatewayResult<()> {
        (**self).copy_file(from, to)
    }

    fn move_path(&self, from: &Path, to: &Path) -> GatewayResult<()> {
        (**self).move_path(from, to)
    }

    fn open_exclusive(&self, path: &Path) -> GatewayResult<()> {
        (**self).open_exclusive(path)
    }

    fn set_read_only(&self, path: &Path, read_only: bool) -> GatewayResult<()> {
        (**self).set_read_only(path, read_only)
    }

    fn create_new(&self, path: &Path) -> GatewayResult<Box<dyn Write + '_>> {
        (**self).create_new(path)
    }

    fn walk_dirs(&self, root: &Path, max_depth: Option<usize>) -> GatewayResult<Vec<PathBuf>> {
        (**self).walk_dirs(root, max_depth)
    }
}

/// Last segment of a path as a `String`, empty for roots
pub fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
