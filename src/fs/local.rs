//! Gateway backed by the real filesystem

use super::traits::{FileEntry, FileSystemGateway, GatewayResult};
use crate::error::GatewayError;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// [`FileSystemGateway`] over `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> GatewayError + '_ {
    move |e| GatewayError::from_io(path, e)
}

#[cfg(windows)]
fn is_hidden(_path: &Path, metadata: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;
    metadata.file_attributes() & (FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM) != 0
}

#[cfg(not(windows))]
fn is_hidden(path: &Path, _metadata: &fs::Metadata) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

fn entry_from_metadata(path: PathBuf, metadata: &fs::Metadata) -> FileEntry {
    let hidden = is_hidden(&path, metadata);
    FileEntry {
        len: metadata.len(),
        read_only: metadata.permissions().readonly(),
        hidden,
        path,
    }
}

/// Children of `path` with their metadata, symlinks resolved to their
/// targets. Dangling links are skipped.
fn read_dir_followed(path: &Path) -> GatewayResult<Vec<(PathBuf, fs::Metadata)>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(path).map_err(io_err(path))? {
        let entry_path = entry.map_err(io_err(path))?.path();
        match fs::metadata(&entry_path) {
            Ok(metadata) => children.push((entry_path, metadata)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Skipping dangling link {:?}", entry_path);
            }
            Err(e) => return Err(GatewayError::from_io(entry_path, e)),
        }
    }
    Ok(children)
}

impl FileSystemGateway for LocalFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> GatewayResult<()> {
        fs::create_dir_all(path).map_err(io_err(path))
    }

    fn list_dirs(&self, path: &Path) -> GatewayResult<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for (entry_path, metadata) in read_dir_followed(path)? {
            if metadata.is_dir() {
                dirs.push(entry_path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    fn list_files(&self, path: &Path) -> GatewayResult<Vec<FileEntry>> {
        let mut files = Vec::new();
        for (entry_path, metadata) in read_dir_followed(path)? {
            if metadata.is_file() {
                files.push(entry_from_metadata(entry_path, &metadata));
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn file_entry(&self, path: &Path) -> GatewayResult<FileEntry> {
        let metadata = fs::metadata(path).map_err(io_err(path))?;
        Ok(entry_from_metadata(path.to_path_buf(), &metadata))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> GatewayResult<()> {
        fs::copy(from, to).map_err(io_err(from))?;
        Ok(())
    }

    fn move_path(&self, from: &Path, to: &Path) -> GatewayResult<()> {
        fs::rename(from, to).map_err(io_err(from))
    }

    fn open_exclusive(&self, path: &Path) -> GatewayResult<()> {
        let mut options = OpenOptions::new();
        options.read(true).write(true);

        #[cfg(windows)]
        {
            use std::os::windows::fs::OpenOptionsExt;
            options.share_mode(0);
        }

        let file: File = options.open(path).map_err(io_err(path))?;
        drop(file);
        Ok(())
    }

    fn set_read_only(&self, path: &Path, read_only: bool) -> GatewayResult<()> {
        let mut permissions = fs::metadata(path).map_err(io_err(path))?.permissions();
        permissions.set_readonly(read_only);
        fs::set_permissions(path, permissions).map_err(io_err(path))
    }

    fn create_new(&self, path: &Path) -> GatewayResult<Box<dyn Write + '_>> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(io_err(path))?;
        Ok(Box::new(file))
    }

    fn walk_dirs(&self, root: &Path, max_depth: Option<usize>) -> GatewayResult<Vec<PathBuf>> {
        let mut walker = WalkDir::new(root).follow_links(true).sort_by_file_name();
        if let Some(depth) = max_depth {
            walker = walker.max_depth(depth);
        }

        let mut dirs = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                match e.into_io_error() {
                    Some(io) => GatewayError::from_io(path, io),
                    None => GatewayError::Io {
                        path,
                        source: std::io::Error::other("filesystem loop detected"),
                    },
                }
            })?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }

        log::debug!("Walked {} directories under {:?}", dirs.len(), root);
        Ok(dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_listings_are_sorted_and_split() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("b")).unwrap();
        fs::create_dir(root.join("a")).unwrap();
        fs::write(root.join("02 - two.mp3"), b"22").unwrap();
        fs::write(root.join("01 - one.mp3"), b"1").unwrap();

        let gateway = LocalFileSystem::new();
        let dirs = gateway.list_dirs(root).unwrap();
        assert_eq!(dirs, vec![root.join("a"), root.join("b")]);

        let files = gateway.list_files(root).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name(), "01 - one.mp3");
        assert_eq!(files[1].len, 2);
    }

    #[test]
    fn test_create_new_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("FRONT.jpg");
        let gateway = LocalFileSystem::new();

        {
            let mut sink = gateway.create_new(&target).unwrap();
            sink.write_all(b"jpeg").unwrap();
        }
        assert_eq!(fs::read(&target).unwrap(), b"jpeg");

        let err = gateway.create_new(&target).err().unwrap();
        assert!(matches!(err, GatewayError::AlreadyExists(_)));
    }

    #[test]
    fn test_missing_dir_is_not_found() {
        let temp = TempDir::new().unwrap();
        let gateway = LocalFileSystem::new();
        let err = gateway.list_files(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
    }

    #[test]
    fn test_walk_dirs_respects_depth() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("Emperor").join("1994 - In the Nightside Eclipse")).unwrap();

        let gateway = LocalFileSystem::new();
        assert_eq!(gateway.walk_dirs(root, None).unwrap().len(), 3);
        assert_eq!(gateway.walk_dirs(root, Some(1)).unwrap().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_followed() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        let store = temp.path().join("store");
        let library = temp.path().join("library");
        let album = store.join("1994 - In the Nightside Eclipse");
        fs::create_dir_all(&album).unwrap();
        fs::create_dir_all(&library).unwrap();
        fs::write(album.join("01 - x.mp3"), b"123").unwrap();

        symlink(&album, library.join("linked album")).unwrap();
        symlink(album.join("01 - x.mp3"), library.join("01 - linked.mp3")).unwrap();
        symlink(temp.path().join("gone.mp3"), library.join("02 - dangling.mp3")).unwrap();

        let gateway = LocalFileSystem::new();
        assert_eq!(gateway.list_dirs(&library).unwrap(), vec![library.join("linked album")]);

        let files = gateway.list_files(&library).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name(), "01 - linked.mp3");
        assert_eq!(files[0].len, 3);

        let songs = gateway.list_files(&library.join("linked album")).unwrap();
        assert_eq!(songs.len(), 1);

        let walked = gateway.walk_dirs(&library, None).unwrap();
        assert!(walked.contains(&library.join("linked album")));
    }
}
