//! # create-ock Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Groups the filesystem pieces used to scaffold a project:
//!
//! - **`io`**: the `FileSystem` capability trait, its `std::fs` implementation
//!   (`StdFileSystem`), and the "absent or empty" destination check.
//! - **`copy`**: the recursive template copy with exclusion and rename rules.
//! - **`embedded`**: the template compiled into the binary, served read-only
//!   through the same `FileSystem` trait.
//! - **`memory`** *(tests only)*: an in-memory `FileSystem` so the copier and
//!   the initializer can be exercised without touching disk.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{copy, io};
//!
//! let fs = io::StdFileSystem;
//! if io::is_available_target(&fs, &root)? {
//!     copy::copy_dir(&fs, &template, &fs, &root, &copy::CopyRules::default())?;
//! }
//! ```
//!

/// Recursive template copy (`copy_dir`, `CopyRules`).
pub mod copy;
/// Bundled template assets (`BundledTemplate`).
pub mod embedded;
/// The `FileSystem` capability and its real implementation.
pub mod io;
/// In-memory `FileSystem` for unit tests.
#[cfg(test)]
pub mod memory;
