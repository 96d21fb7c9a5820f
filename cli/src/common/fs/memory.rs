//! In-memory `FileSystem` used by unit tests of the copier and initializer.

use super::io::{DirEntry, EntryKind, FileSystem};
use crate::core::error::{CreateError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// A tree of directories and files held in a map keyed by absolute path.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
    denied_writes: Mutex<BTreeSet<PathBuf>>,
    writes: Mutex<usize>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        let fs = Self::default();
        fs.nodes
            .lock()
            .unwrap()
            .insert(PathBuf::from("/"), Node::Dir);
        fs
    }

    /// Adds a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent).unwrap();
        }
        self.nodes
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Node::File(contents.as_ref().to_vec()));
        self
    }

    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.create_dir_all(path.as_ref()).unwrap();
        self
    }

    /// Makes every later `write_file` to `path` fail.
    pub fn deny_write(&self, path: impl AsRef<Path>) {
        self.denied_writes
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.nodes.lock().unwrap().get(path.as_ref()) {
            Some(Node::File(bytes)) => Some(bytes.clone()),
            _ => None,
        }
    }

    /// All file paths at or below `root`.
    pub fn files_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        self.nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|(path, node)| {
                matches!(node, Node::File(_)) && path.starts_with(root.as_ref())
            })
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let nodes = self.nodes.lock().unwrap();
        match nodes.get(path) {
            Some(Node::Dir) => {}
            _ => anyhow::bail!(CreateError::FileSystem(format!(
                "Not a directory: {:?}",
                path
            ))),
        }
        Ok(nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(path))
            .filter_map(|(child, node)| {
                let kind = match node {
                    Node::Dir => EntryKind::Directory,
                    Node::File(_) => EntryKind::File,
                };
                child.file_name().map(|name| DirEntry {
                    name: name.to_os_string(),
                    kind,
                })
            })
            .collect())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.contents(path).ok_or_else(|| {
            anyhow::anyhow!(CreateError::FileSystem(format!(
                "Failed to read file {:?}",
                path
            )))
        })
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.denied_writes.lock().unwrap().contains(path) {
            anyhow::bail!(CreateError::FileSystem(format!(
                "Permission denied writing {:?}",
                path
            )));
        }
        let mut nodes = self.nodes.lock().unwrap();
        let parent_is_dir = path
            .parent()
            .is_some_and(|parent| matches!(nodes.get(parent), Some(Node::Dir)));
        if !parent_is_dir {
            anyhow::bail!(CreateError::FileSystem(format!(
                "Parent directory missing for {:?}",
                path
            )));
        }
        if matches!(nodes.get(path), Some(Node::Dir)) {
            anyhow::bail!(CreateError::FileSystem(format!(
                "Is a directory: {:?}",
                path
            )));
        }
        nodes.insert(path.to_path_buf(), Node::File(contents.to_vec()));
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut nodes = self.nodes.lock().unwrap();
        for ancestor in path.ancestors() {
            match nodes.get(ancestor) {
                Some(Node::File(_)) => anyhow::bail!(CreateError::FileSystem(format!(
                    "Path exists but is not a directory: {:?}",
                    ancestor
                ))),
                Some(Node::Dir) => {}
                None => {
                    nodes.insert(ancestor.to_path_buf(), Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.lock().unwrap().get(path), Some(Node::Dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_dir_lists_direct_children_only() {
        let fs = MemoryFileSystem::new()
            .with_file("/tpl/a.txt", "a")
            .with_file("/tpl/sub/b.txt", "b");
        let mut names: Vec<_> = fs
            .read_dir(Path::new("/tpl"))
            .unwrap()
            .into_iter()
            .map(|e| (e.name.into_string().unwrap(), e.kind))
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                ("a.txt".to_string(), EntryKind::File),
                ("sub".to_string(), EntryKind::Directory)
            ]
        );
    }

    #[test]
    fn test_write_requires_parent() {
        let fs = MemoryFileSystem::new();
        assert!(fs.write_file(Path::new("/missing/x"), b"x").is_err());
        fs.create_dir_all(Path::new("/missing")).unwrap();
        fs.write_file(Path::new("/missing/x"), b"x").unwrap();
        assert_eq!(fs.contents("/missing/x"), Some(b"x".to_vec()));
        assert_eq!(fs.write_count(), 1);
    }
}
