//! Folder moves, copies and cover writes

use crate::classify::COVER_FILE_NAME;
use crate::error::{Error, GatewayError, Result};
use crate::fs::{FileSystemGateway, GatewayResult};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File and folder operations over a gateway
pub struct FolderOrganizer<G: FileSystemGateway> {
    gateway: G,
}

impl<G: FileSystemGateway> FolderOrganizer<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Whether `path` is a usable directory, creating it first when asked to
    pub fn validate_directory(&self, path: &Path, create_if_missing: bool) -> Result<bool> {
        if self.gateway.dir_exists(path) {
            return Ok(true);
        }
        if !create_if_missing {
            return Ok(false);
        }

        log::info!("Creating directory {:?}", path);
        self.gateway.create_dir_all(path)?;
        Ok(true)
    }

    /// Move `source` into `destination`, keeping its name.
    /// Returns the folder's new path.
    pub fn move_folder(&self, source: &Path, destination: &Path) -> Result<PathBuf> {
        let target = destination.join(leaf(source)?);
        self.gateway.create_dir_all(destination)?;
        self.gateway.move_path(source, &target)?;

        log::info!("Moved {:?} to {:?}", source, target);
        Ok(target)
    }

    /// Copy `source` and everything below it into `destination_dir`,
    /// overwriting files already there. Returns the copy's path.
    ///
    /// A destination inside `source` is rejected before anything is written.
    pub fn copy_folder(&self, source: &Path, destination_dir: &Path) -> Result<PathBuf> {
        if destination_dir.starts_with(source) {
            return Err(Error::CopyIntoItself {
                folder: source.to_path_buf(),
                destination: destination_dir.to_path_buf(),
            });
        }
        let target = destination_dir.join(leaf(source)?);
        self.copy_tree(source, &target)?;

        log::info!("Copied {:?} to {:?}", source, target);
        Ok(target)
    }

    fn copy_tree(&self, source: &Path, target: &Path) -> GatewayResult<()> {
        self.gateway.create_dir_all(target)?;

        for file in self.gateway.list_files(source)? {
            let copy = target.join(file.name());
            log::debug!("Copying {:?}", file.path);
            self.gateway.copy_file(&file.path, &copy)?;
        }
        for dir in self.gateway.list_dirs(source)? {
            if let Some(name) = dir.file_name() {
                self.copy_tree(&dir, &target.join(name))?;
            }
        }
        Ok(())
    }

    /// Write `bytes` as the folder's canonical cover. Never overwrites an
    /// existing cover.
    pub fn save_cover_image(&self, dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
        let path = dir.join(COVER_FILE_NAME);
        let mut sink = self.gateway.create_new(&path)?;
        sink.write_all(bytes)
            .and_then(|_| sink.flush())
            .map_err(|e| GatewayError::from_io(&path, e))?;

        log::info!("Saved cover image {:?}", path);
        Ok(path)
    }

    /// A file is locked when it is read-only or someone else holds it open
    pub fn is_file_locked(&self, path: &Path) -> Result<bool> {
        let entry = self.gateway.file_entry(path)?;
        if entry.read_only {
            return Ok(true);
        }

        match self.gateway.open_exclusive(path) {
            Ok(()) => Ok(false),
            Err(e) => {
                log::debug!("{:?} is in use: {}", path, e);
                Ok(true)
            }
        }
    }

    /// Clear the read-only flag if it is set
    pub fn unlock_file(&self, path: &Path) -> Result<()> {
        if self.gateway.file_entry(path)?.read_only {
            self.gateway.set_read_only(path, false)?;
            log::debug!("Cleared read-only flag on {:?}", path);
        }
        Ok(())
    }
}

/// Last segment of a folder path; a root or `..` has none
fn leaf(path: &Path) -> GatewayResult<&OsStr> {
    path.file_name()
        .ok_or_else(|| GatewayError::NotFound(path.to_path_buf()))
}
