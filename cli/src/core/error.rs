//! # create-ock Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the scaffolder. It
//! follows a two-layer approach:
//! - `CreateError`: a `thiserror` enum for the failure modes callers need to
//!   tell apart (most importantly, user cancellation).
//! - `Result<T>`: an alias for `anyhow::Result<T>` so any step can attach
//!   context with `.context(...)`.
//!
//! Prompt validation failures (an occupied directory, a bad package name) are
//! not errors at all: the prompt re-asks inline and they never surface here.
//!
//! ## Examples
//!
//! ```rust
//! // Detect cancellation at the top level.
//! if let Some(CreateError::Cancelled) = err.downcast_ref::<CreateError>() {
//!     println!("{}", CreateError::Cancelled);
//!     std::process::exit(1);
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the create-ock application.
#[derive(Error, Debug)]
pub enum CreateError {
    /// The user aborted an interactive prompt (EOF or interrupt on stdin).
    #[error("✖ Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Template directory '{}' not found or not a directory.", path.display())]
    TemplateNotFound { path: PathBuf },

    #[error("Invalid manifest '{}': {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

/// Returns true when the error chain bottoms out in a user cancellation.
pub fn is_cancellation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<CreateError>(),
            Some(CreateError::Cancelled)
        )
    })
}
