//! # create-ock Commands
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Command handlers. The binary has a single action, scaffolding a project,
//! implemented in `create`.
//!

/// Prompts, copies the template and finalizes the new project.
pub mod create;
