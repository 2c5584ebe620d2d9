//! Error types for folder classification and name parsing
//!
//! Library code returns [`Error`]; the binary wraps it in `anyhow` for
//! context at the boundary.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while classifying folders or parsing names
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Folder matched none of the three folder types
    #[error("Couldn't retrieve folder type for: {}", path.display())]
    Classification { path: PathBuf },

    /// Enumerating a folder's images failed while looking for its cover
    #[error("Something went wrong trying to retrieve cover image on {}: {source}", path.display())]
    CoverResolution {
        path: PathBuf,
        #[source]
        source: GatewayError,
    },

    /// Name matching ran past its time budget
    #[error("Name matching exceeded its {budget:?} budget on {input:?}")]
    NameMatchTimeout { input: String, budget: Duration },

    /// Song file name doesn't have the `NN - Title.ext` shape
    #[error("Couldn't parse song file name {name:?}: {reason}")]
    FileNameParse { name: String, reason: String },

    /// Copy destination lies inside the folder being copied
    #[error("Can't copy {} into its own subfolder {}", folder.display(), destination.display())]
    CopyIntoItself { folder: PathBuf, destination: PathBuf },

    /// Filesystem operation failure
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl Error {
    pub fn classification(path: impl Into<PathBuf>) -> Self {
        Self::Classification { path: path.into() }
    }

    pub fn file_name_parse(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FileNameParse {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn timeout(input: impl Into<String>, budget: Duration) -> Self {
        Self::NameMatchTimeout {
            input: input.into(),
            budget,
        }
    }

    /// Rewrap a gateway failure as a cover resolution failure for `path`.
    /// Errors of other kinds pass through untouched.
    pub fn into_cover_error(self, path: &Path) -> Self {
        match self {
            Self::Gateway(source) => Self::CoverResolution {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }

    /// True when the error is a name matching budget overrun
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::NameMatchTimeout { .. })
    }
}

/// Failure reported by a [`FileSystemGateway`](crate::fs::FileSystemGateway)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GatewayError {
    /// Map an `io::Error` raised while touching `path`
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            io::ErrorKind::AlreadyExists => Self::AlreadyExists(path),
            _ => Self::Io { path, source: err },
        }
    }

    /// Path the failing operation was working on
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::AlreadyExists(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}
