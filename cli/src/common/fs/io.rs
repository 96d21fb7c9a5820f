//! # create-ock Filesystem Capability
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Every filesystem side effect of the scaffolder goes through the small
//! `FileSystem` trait defined here, so the copier and the initializer can run
//! against the real disk (`StdFileSystem`) or against an in-memory fake in
//! tests (`super::memory::MemoryFileSystem`).
//!
//! ## Architecture
//!
//! The capability is deliberately narrow:
//! - **`read_dir`**: direct children of a directory, each tagged file or directory.
//! - **`read_file`** / **`write_file`**: whole-file byte I/O. Writes overwrite.
//! - **`create_dir_all`**: `mkdir -p`.
//! - **`exists`** / **`is_dir`**: metadata queries used by prompt validation.
//!
//! On top of the trait, `is_available_target` encodes the destination rule:
//! a project directory may only be used when it is absent or empty.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io::{FileSystem, StdFileSystem};
//!
//! let fs = StdFileSystem;
//! fs.create_dir_all(Path::new("./out/app"))?;
//! fs.write_file(Path::new("./out/app/README.md"), b"# hi")?;
//! ```
//!
use crate::core::error::{CreateError, Result};
use anyhow::Context;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use tracing::debug;

/// What a directory entry is, as far as copying is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    File,
    Directory,
}

/// A single child returned by `FileSystem::read_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: OsString,
    pub kind: EntryKind,
}

/// Filesystem operations needed to scaffold a project.
pub trait FileSystem: Send + Sync {
    /// Lists the direct children of `path`. Order is unspecified.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    /// Writes `contents` to `path`, replacing any existing file.
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
}

/// `FileSystem` backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)
            .with_context(|| format!("Failed to read directory {:?}", path))?
        {
            let entry = entry.with_context(|| format!("Failed to read entry in {:?}", path))?;
            // Follow symlinks so a linked template file is copied as content.
            let metadata = fs::metadata(entry.path())
                .with_context(|| format!("Failed to stat {:?}", entry.path()))?;
            let kind = if metadata.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(DirEntry {
                name: entry.file_name(),
                kind,
            });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("Failed to read file {:?}", path))
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(path, contents).with_context(|| format!("Failed to write to file {:?}", path))?;
        debug!("Wrote {} bytes to {:?}", contents.len(), path);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        if path.exists() && !path.is_dir() {
            anyhow::bail!(CreateError::FileSystem(format!(
                "Path exists but is not a directory: {:?}",
                path
            )));
        }
        fs::create_dir_all(path).with_context(|| format!("Failed to create directory {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// True when `path` can receive a new project: it is absent, or an empty directory.
///
/// A regular file at `path` is never available.
pub fn is_available_target(fs: &dyn FileSystem, path: &Path) -> Result<bool> {
    if !fs.exists(path) {
        return Ok(true);
    }
    if !fs.is_dir(path) {
        return Ok(false);
    }
    Ok(fs.read_dir(path)?.is_empty())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_dir_all_creates_parents() -> Result<()> {
        let base = tempdir()?;
        let nested = base.path().join("new/subdir");
        StdFileSystem.create_dir_all(&nested)?;
        assert!(nested.is_dir());
        // Second call is a no-op.
        StdFileSystem.create_dir_all(&nested)?;
        Ok(())
    }

    #[test]
    fn test_create_dir_all_rejects_file() -> Result<()> {
        let base = tempdir()?;
        let file_path = base.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = StdFileSystem.create_dir_all(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_read_write_bytes() -> Result<()> {
        let base = tempdir()?;
        let file_path = base.path().join("data.bin");
        let content = [0u8, 159, 146, 150, b'\n'];
        StdFileSystem.write_file(&file_path, &content)?;
        assert_eq!(StdFileSystem.read_file(&file_path)?, content);
        Ok(())
    }

    #[test]
    fn test_read_dir_tags_kinds() -> Result<()> {
        let base = tempdir()?;
        fs::create_dir(base.path().join("app"))?;
        fs::write(base.path().join("package.json"), "{}")?;

        let mut entries = StdFileSystem.read_dir(base.path())?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![
                DirEntry {
                    name: "app".into(),
                    kind: EntryKind::Directory
                },
                DirEntry {
                    name: "package.json".into(),
                    kind: EntryKind::File
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_read_missing_file_errors() -> Result<()> {
        let base = tempdir()?;
        assert!(StdFileSystem.read_file(&base.path().join("nope")).is_err());
        Ok(())
    }

    #[test]
    fn test_is_available_target() -> Result<()> {
        let base = tempdir()?;
        let fs_cap = StdFileSystem;

        let absent = base.path().join("absent");
        assert!(is_available_target(&fs_cap, &absent)?);

        let empty = base.path().join("empty");
        fs::create_dir(&empty)?;
        assert!(is_available_target(&fs_cap, &empty)?);

        let busy = base.path().join("busy");
        fs::create_dir(&busy)?;
        fs::write(busy.join("file.txt"), "x")?;
        assert!(!is_available_target(&fs_cap, &busy)?);

        let file = base.path().join("plain.txt");
        fs::write(&file, "x")?;
        assert!(!is_available_target(&fs_cap, &file)?);
        Ok(())
    }
}
