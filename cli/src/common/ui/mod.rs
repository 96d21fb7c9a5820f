//! # create-ock UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal interaction helpers. Currently this is the `prompts` submodule:
//! text questions with defaults, inline validation and cancellation on
//! Ctrl+C or EOF. On a terminal they are drawn with `dialoguer`.
//!
//! ```rust
//! use crate::common::ui::prompts::{self, TextPrompt};
//!
//! let mut p = prompts::stdio_prompter();
//! let question = TextPrompt { message: "Project name:", initial: "my-app" };
//! let name = p.text(&question, &|_| Ok(()))?;
//! ```
//!

/// Interactive text prompts.
pub mod prompts;
