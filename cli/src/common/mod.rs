//! # create-ock Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities that the `create` command builds on, kept apart from the
//! command logic itself:
//!
//! - **`fs`**: the filesystem capability, the real and in-memory backends, and
//!   the template copier.
//! - **`ui`**: interactive terminal prompts.
//!

/// Filesystem capability and template copy.
pub mod fs;
/// Interactive prompts.
pub mod ui;
