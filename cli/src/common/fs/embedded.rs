//! # create-ock Bundled Template
//!
//! File: cli/src/common/fs/embedded.rs
//!
//! ## Overview
//!
//! The Next.js template under `cli/templates/next` is compiled into the binary
//! with `rust-embed`, so a release build scaffolds projects without the source
//! tree around. `BundledTemplate` exposes those assets as a read-only
//! `FileSystem` rooted at the empty path, which lets `copy::copy_dir` read from
//! it exactly as it reads an on-disk template.
//!
//! Embedded assets are keyed by `/`-separated relative paths
//! (`app/page.tsx`). Directories are implied by those keys; there are no empty
//! directories in the bundle.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{copy, embedded::BundledTemplate, io::StdFileSystem};
//!
//! let rules = copy::CopyRules::default();
//! copy::copy_dir(&BundledTemplate, Path::new(""), &StdFileSystem, &root, &rules)?;
//! ```
//!
use super::io::{DirEntry, EntryKind, FileSystem};
use crate::core::error::{CreateError, Result};
use rust_embed::RustEmbed;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Component, Path};

#[derive(RustEmbed)]
#[folder = "templates/next/"]
struct NextTemplate;

/// Read-only `FileSystem` over the template compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledTemplate;

/// Asset key for `path`: its normal components joined with `/`.
fn asset_key(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Prefix shared by every asset below the directory `key`.
fn dir_prefix(key: &str) -> String {
    if key.is_empty() {
        String::new()
    } else {
        format!("{}/", key)
    }
}

fn read_only(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(CreateError::FileSystem(format!(
        "Bundled template is read-only: {:?}",
        path
    )))
}

impl FileSystem for BundledTemplate {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let prefix = dir_prefix(&asset_key(path));
        let mut children: BTreeMap<String, EntryKind> = BTreeMap::new();
        for asset in NextTemplate::iter() {
            let Some(rest) = asset.strip_prefix(prefix.as_str()) else {
                continue;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    children.insert(dir.to_string(), EntryKind::Directory);
                }
                None => {
                    children.entry(rest.to_string()).or_insert(EntryKind::File);
                }
            }
        }
        if children.is_empty() {
            anyhow::bail!(CreateError::FileSystem(format!(
                "Not a directory in the bundled template: {:?}",
                path
            )));
        }
        Ok(children
            .into_iter()
            .map(|(name, kind)| DirEntry {
                name: OsString::from(name),
                kind,
            })
            .collect())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        NextTemplate::get(&asset_key(path))
            .map(|file| file.data.into_owned())
            .ok_or_else(|| {
                anyhow::anyhow!(CreateError::FileSystem(format!(
                    "File not found in the bundled template: {:?}",
                    path
                )))
            })
    }

    fn write_file(&self, path: &Path, _contents: &[u8]) -> Result<()> {
        Err(read_only(path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        Err(read_only(path))
    }

    fn exists(&self, path: &Path) -> bool {
        NextTemplate::get(&asset_key(path)).is_some() || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let key = asset_key(path);
        if key.is_empty() {
            return true;
        }
        let prefix = dir_prefix(&key);
        NextTemplate::iter().any(|asset| asset.starts_with(prefix.as_str()))
    }
}
