//! In-memory gateway
//!
//! A fake filesystem for tests and for embedders that want to classify a tree
//! they already hold in memory. Paths are used verbatim as keys, so build
//! trees with absolute paths (`/music/...`).

use super::traits::{FileEntry, FileSystemGateway, GatewayResult};
use crate::error::GatewayError;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File {
        data: Vec<u8>,
        read_only: bool,
        hidden: bool,
    },
}

#[derive(Debug, Default)]
struct Tree {
    nodes: BTreeMap<PathBuf, Node>,
    broken: BTreeSet<PathBuf>,
    locked: BTreeSet<PathBuf>,
}

impl Tree {
    fn ensure_dirs(&mut self, dir: &Path) {
        for ancestor in dir.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Dir);
        }
    }

    fn require_dir(&self, path: &Path) -> GatewayResult<()> {
        if self.broken.contains(path) {
            return Err(GatewayError::Io {
                path: path.to_path_buf(),
                source: io::Error::other("simulated enumeration failure"),
            });
        }
        match self.nodes.get(path) {
            Some(Node::Dir) => Ok(()),
            _ => Err(GatewayError::NotFound(path.to_path_buf())),
        }
    }

    fn children<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = (&'a PathBuf, &'a Node)> + 'a {
        self.nodes
            .iter()
            .filter(move |(p, _)| p.parent() == Some(path))
    }

    fn entry(&self, path: &Path) -> GatewayResult<FileEntry> {
        match self.nodes.get(path) {
            Some(Node::File {
                data,
                read_only,
                hidden,
            }) => Ok(FileEntry {
                path: path.to_path_buf(),
                len: data.len() as u64,
                read_only: *read_only,
                hidden: *hidden,
            }),
            _ => Err(GatewayError::NotFound(path.to_path_buf())),
        }
    }
}

/// [`FileSystemGateway`] over an in-memory tree
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    tree: Mutex<Tree>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn tree(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a directory (and its parents)
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.tree().ensure_dirs(path.as_ref());
        self
    }

    /// Add a file of `len` zero bytes (and its parent directories)
    pub fn with_file(self, path: impl AsRef<Path>, len: usize) -> Self {
        self.insert_file(path.as_ref(), vec![0; len], false, false);
        self
    }

    /// Add a hidden/system file
    pub fn with_hidden_file(self, path: impl AsRef<Path>) -> Self {
        self.insert_file(path.as_ref(), Vec::new(), false, true);
        self
    }

    /// Add a file with the read-only attribute set
    pub fn with_read_only_file(self, path: impl AsRef<Path>) -> Self {
        self.insert_file(path.as_ref(), Vec::new(), true, false);
        self
    }

    /// Mark a file as held open by another process
    pub fn with_locked_file(self, path: impl AsRef<Path>) -> Self {
        self.insert_file(path.as_ref(), Vec::new(), false, false);
        self.tree().locked.insert(path.as_ref().to_path_buf());
        self
    }

    /// Make every enumeration of `path` fail
    pub fn with_broken_dir(self, path: impl AsRef<Path>) -> Self {
        let mut tree = self.tree();
        tree.ensure_dirs(path.as_ref());
        tree.broken.insert(path.as_ref().to_path_buf());
        drop(tree);
        self
    }

    fn insert_file(&self, path: &Path, data: Vec<u8>, read_only: bool, hidden: bool) {
        let mut tree = self.tree();
        if let Some(parent) = path.parent() {
            tree.ensure_dirs(parent);
        }
        tree.nodes.insert(
            path.to_path_buf(),
            Node::File {
                data,
                read_only,
                hidden,
            },
        );
    }

    /// Contents of a file, if it exists
    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.tree().nodes.get(path.as_ref()) {
            Some(Node::File { data, .. }) => Some(data.clone()),
            _ => None,
        }
    }

    /// Whether anything (file or directory) lives at `path`
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.tree().nodes.contains_key(path.as_ref())
    }
}

impl FileSystemGateway for MemoryFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        matches!(self.tree().nodes.get(path), Some(Node::Dir))
    }

    fn create_dir_all(&self, path: &Path) -> GatewayResult<()> {
        let mut tree = self.tree();
        if let Some(Node::File { .. }) = tree.nodes.get(path) {
            return Err(GatewayError::AlreadyExists(path.to_path_buf()));
        }
        tree.ensure_dirs(path);
        Ok(())
    }

    fn list_dirs(&self, path: &Path) -> GatewayResult<Vec<PathBuf>> {
        let tree = self.tree();
        tree.require_dir(path)?;
        Ok(tree
            .children(path)
            .filter(|(_, node)| matches!(node, Node::Dir))
            .map(|(p, _)| p.clone())
            .collect())
    }

    fn list_files(&self, path: &Path) -> GatewayResult<Vec<FileEntry>> {
        let tree = self.tree();
        tree.require_dir(path)?;
        tree.children(path)
            .filter(|(_, node)| matches!(node, Node::File { .. }))
            .map(|(p, _)| tree.entry(p))
            .collect()
    }

    fn file_entry(&self, path: &Path) -> GatewayResult<FileEntry> {
        self.tree().entry(path)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> GatewayResult<()> {
        let mut tree = self.tree();
        let data = match tree.nodes.get(from) {
            Some(Node::File { data, .. }) => data.clone(),
            _ => return Err(GatewayError::NotFound(from.to_path_buf())),
        };
        if let Some(parent) = to.parent() {
            tree.require_dir(parent)?;
        }
        tree.nodes.insert(
            to.to_path_buf(),
            Node::File {
                data,
                read_only: false,
                hidden: false,
            },
        );
        Ok(())
    }

    fn move_path(&self, from: &Path, to: &Path) -> GatewayResult<()> {
        let mut tree = self.tree();
        if !tree.nodes.contains_key(from) {
            return Err(GatewayError::NotFound(from.to_path_buf()));
        }
        if tree.nodes.contains_key(to) {
            return Err(GatewayError::AlreadyExists(to.to_path_buf()));
        }
        if let Some(parent) = to.parent() {
            tree.require_dir(parent)?;
        }

        let moved: Vec<PathBuf> = tree
            .nodes
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in moved {
            if let (Ok(rest), Some(node)) = (old.strip_prefix(from), tree.nodes.remove(&old)) {
                let new = if rest.as_os_str().is_empty() {
                    to.to_path_buf()
                } else {
                    to.join(rest)
                };
                tree.nodes.insert(new, node);
            }
        }
        Ok(())
    }

    fn open_exclusive(&self, path: &Path) -> GatewayResult<()> {
        let tree = self.tree();
        tree.entry(path)?;
        if tree.locked.contains(path) {
            return Err(GatewayError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::WouldBlock, "file is in use"),
            });
        }
        Ok(())
    }

    fn set_read_only(&self, path: &Path, read_only: bool) -> GatewayResult<()> {
        match self.tree().nodes.get_mut(path) {
            Some(Node::File { read_only: flag, .. }) => {
                *flag = read_only;
                Ok(())
            }
            _ => Err(GatewayError::NotFound(path.to_path_buf())),
        }
    }

    fn create_new(&self, path: &Path) -> GatewayResult<Box<dyn Write + '_>> {
        let mut tree = self.tree();
        if tree.nodes.contains_key(path) {
            return Err(GatewayError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            tree.require_dir(parent)?;
        }
        tree.nodes.insert(
            path.to_path_buf(),
            Node::File {
                data: Vec::new(),
                read_only: false,
                hidden: false,
            },
        );
        Ok(Box::new(MemoryWriter {
            fs: self,
            path: path.to_path_buf(),
        }))
    }
}

/// Appends written bytes straight into the tree
struct MemoryWriter<'a> {
    fs: &'a MemoryFileSystem,
    path: PathBuf,
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.fs.tree().nodes.get_mut(&self.path) {
            Some(Node::File { data, .. }) => {
                data.extend_from_slice(buf);
                Ok(buf.len())
            }
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "file removed while writing")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_parents() {
        let fs = MemoryFileSystem::new().with_file("/music/Emperor/01 - x.mp3", 3);
        assert!(fs.dir_exists(Path::new("/music/Emperor")));
        assert!(fs.dir_exists(Path::new("/music")));

        let files = fs.list_files(Path::new("/music/Emperor")).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].len, 3);
        assert!(fs.list_files(Path::new("/music")).unwrap().is_empty());
    }

    #[test]
    fn test_broken_dir_fails_enumeration() {
        let fs = MemoryFileSystem::new().with_broken_dir("/music/broken");
        assert!(matches!(
            fs.list_dirs(Path::new("/music/broken")),
            Err(GatewayError::Io { .. })
        ));
        assert!(fs.list_dirs(Path::new("/music")).is_ok());
    }

    #[test]
    fn test_move_path_moves_subtree() {
        let fs = MemoryFileSystem::new()
            .with_file("/in/Album/CD1/01 - a.mp3", 1)
            .with_dir("/out");

        fs.move_path(Path::new("/in/Album"), Path::new("/out/Album"))
            .unwrap();

        assert!(fs.exists("/out/Album/CD1/01 - a.mp3"));
        assert!(!fs.exists("/in/Album"));
        assert!(fs.exists("/in"));
    }

    #[test]
    fn test_writer_appends() {
        let fs = MemoryFileSystem::new().with_dir("/a");
        {
            let mut sink = fs.create_new(Path::new("/a/FRONT.jpg")).unwrap();
            sink.write_all(b"ab").unwrap();
            sink.write_all(b"cd").unwrap();
        }
        assert_eq!(fs.read("/a/FRONT.jpg").unwrap(), b"abcd");
    }

    #[test]
    fn test_locked_file_refuses_exclusive_open() {
        let fs = MemoryFileSystem::new()
            .with_locked_file("/a/locked.mp3")
            .with_file("/a/free.mp3", 1);
        assert!(fs.open_exclusive(Path::new("/a/locked.mp3")).is_err());
        assert!(fs.open_exclusive(Path::new("/a/free.mp3")).is_ok());
    }
}
