//! # Generated Manifest Rewrite
//!
//! File: cli/src/commands/create/manifest.rs
//!
//! After the template is copied, the project's `package.json` still carries the
//! template's name. `set_package_name` replaces only the `name` field and
//! writes the document back with 2-space indentation, keeping every other
//! field and the original key order.
//!
use crate::common::fs::io::FileSystem;
use crate::core::error::{CreateError, Result};
use anyhow::{anyhow, Context};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the manifest at the root of a generated project.
pub const MANIFEST_FILE: &str = "package.json";

/// Sets `name` in `<root>/package.json` and returns the manifest path.
pub fn set_package_name(fs: &dyn FileSystem, root: &Path, package_name: &str) -> Result<PathBuf> {
    let path = root.join(MANIFEST_FILE);
    let raw = fs
        .read_file(&path)
        .with_context(|| format!("Failed to read generated manifest {:?}", path))?;

    let mut manifest: Value = serde_json::from_slice(&raw).map_err(|e| {
        anyhow!(CreateError::Manifest {
            path: path.clone(),
            reason: e.to_string(),
        })
    })?;

    let Some(fields) = manifest.as_object_mut() else {
        return Err(anyhow!(CreateError::Manifest {
            path,
            reason: "root is not a JSON object".to_string(),
        }));
    };
    fields.insert("name".to_string(), Value::String(package_name.to_string()));

    // serde_json's pretty printer indents with two spaces.
    let rendered = serde_json::to_string_pretty(&manifest)
        .with_context(|| format!("Failed to serialize manifest {:?}", path))?;
    fs.write_file(&path, rendered.as_bytes())?;
    info!("Set package name '{}' in {:?}", package_name, path);
    Ok(path)
}
