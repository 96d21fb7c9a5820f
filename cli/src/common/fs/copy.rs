//! # create-ock Template Copy
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Recursively mirrors a template tree into a new project directory. The walk
//! applies three fixed rules:
//! - directories named in `CopyRules::exclude_dirs` are skipped with their subtree;
//! - files named in `CopyRules::exclude_files` are skipped;
//! - file names found in `CopyRules::renames` are written under their mapped
//!   name (directories are never renamed).
//!
//! Exclusions match on the entry name alone, wherever it sits in the tree.
//! File contents are copied byte for byte.
//!
//! Source and destination are separate `FileSystem`s: the bundled template is
//! read from the binary while the project is written to disk.
//!
//! ## Failure behaviour
//!
//! The first read or write error aborts the copy and is returned with context.
//! Nothing is rolled back: the destination may be left partially populated.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{copy, io::StdFileSystem};
//!
//! let rules = copy::CopyRules::default();
//! let summary = copy::copy_dir(&StdFileSystem, &template, &StdFileSystem, &root, &rules)?;
//! println!("{} files copied", summary.files_copied);
//! ```
//!
use super::io::{EntryKind, FileSystem};
use crate::core::error::Result;
use anyhow::Context;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info};

/// Template file names that cannot ship as dotfiles, and their real names.
pub const RENAME_FILES: &[(&str, &str)] =
    &[("_gitignore", ".gitignore"), ("_env.local", ".env.local")];
/// Dependency caches and build output.
pub const EXCLUDE_DIRS: &[&str] = &["node_modules", ".next"];
/// OS-generated metadata.
pub const EXCLUDE_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Exclusion and rename rules applied during a copy.
#[derive(Debug, Clone, Copy)]
pub struct CopyRules<'a> {
    pub renames: &'a [(&'a str, &'a str)],
    pub exclude_dirs: &'a [&'a str],
    pub exclude_files: &'a [&'a str],
}

impl Default for CopyRules<'static> {
    fn default() -> Self {
        Self {
            renames: RENAME_FILES,
            exclude_dirs: EXCLUDE_DIRS,
            exclude_files: EXCLUDE_FILES,
        }
    }
}

impl<'a> CopyRules<'a> {
    fn is_excluded_dir(&self, name: &OsStr) -> bool {
        self.exclude_dirs.iter().any(|d| name == OsStr::new(d))
    }

    fn is_excluded_file(&self, name: &OsStr) -> bool {
        self.exclude_files.iter().any(|f| name == OsStr::new(f))
    }

    /// Destination name for a file; identity when no rule matches.
    pub fn target_file_name<'n>(&self, name: &'n OsStr) -> &'n OsStr
    where
        'a: 'n,
    {
        self.renames
            .iter()
            .find(|(from, _)| name == OsStr::new(from))
            .map(|(_, to)| OsStr::new(*to))
            .unwrap_or(name)
    }
}

/// Counts gathered while copying, used for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopySummary {
    pub files_copied: usize,
    pub dirs_created: usize,
    pub entries_skipped: usize,
}

/// Copies `source` (read through `source_fs`) into `target` (written through
/// `target_fs`), creating `target` and its parents first.
pub fn copy_dir(
    source_fs: &dyn FileSystem,
    source: &Path,
    target_fs: &dyn FileSystem,
    target: &Path,
    rules: &CopyRules<'_>,
) -> Result<CopySummary> {
    info!("Starting template copy from {:?} to {:?}", source, target);
    let mut summary = CopySummary::default();
    let fs = Endpoints {
        source: source_fs,
        target: target_fs,
    };
    copy_dir_inner(&fs, source, target, rules, &mut summary)?;
    info!(
        "Finished template copy: {} files, {} directories, {} skipped",
        summary.files_copied, summary.dirs_created, summary.entries_skipped
    );
    Ok(summary)
}

struct Endpoints<'f> {
    source: &'f dyn FileSystem,
    target: &'f dyn FileSystem,
}

fn copy_dir_inner(
    fs: &Endpoints<'_>,
    source: &Path,
    target: &Path,
    rules: &CopyRules<'_>,
    summary: &mut CopySummary,
) -> Result<()> {
    fs.target
        .create_dir_all(target)
        .with_context(|| format!("Failed to create directory {:?}", target))?;
    summary.dirs_created += 1;

    let entries = fs
        .source
        .read_dir(source)
        .with_context(|| format!("Failed to list template directory {:?}", source))?;

    for entry in entries {
        let src_path = source.join(&entry.name);
        match entry.kind {
            EntryKind::Directory if rules.is_excluded_dir(&entry.name) => {
                debug!("Skipping excluded directory {:?}", src_path);
                summary.entries_skipped += 1;
            }
            EntryKind::Directory => {
                copy_dir_inner(fs, &src_path, &target.join(&entry.name), rules, summary)?;
            }
            EntryKind::File if rules.is_excluded_file(&entry.name) => {
                debug!("Skipping excluded file {:?}", src_path);
                summary.entries_skipped += 1;
            }
            EntryKind::File => {
                let dest_path = target.join(rules.target_file_name(&entry.name));
                let bytes = fs.source.read_file(&src_path)?;
                fs.target.write_file(&dest_path, &bytes).with_context(|| {
                    format!("Failed to copy file {:?} to {:?}", src_path, dest_path)
                })?;
                debug!("Copied {:?} to {:?}", src_path, dest_path);
                summary.files_copied += 1;
            }
        }
    }
    Ok(())
}
