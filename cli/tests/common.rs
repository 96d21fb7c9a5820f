//! # create-ock Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every command
//! built here runs in an isolated working directory with its own (empty)
//! user configuration directory, so a developer's real config never leaks in.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Source of the template compiled into the binary.
pub fn bundled_template() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/next")
}

/// Scratch workspace: a working directory plus a private config home.
pub struct Workspace {
    pub cwd: TempDir,
    config_home: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            cwd: tempfile::tempdir().expect("Failed to create temp cwd"),
            config_home: tempfile::tempdir().expect("Failed to create temp config home"),
        }
    }

    pub fn path(&self) -> &Path {
        self.cwd.path()
    }

    /// `program` running inside this workspace with the bundled template.
    pub fn cmd_for(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.current_dir(self.cwd.path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("HOME", self.config_home.path())
            .env_remove("CREATE_OCK_TEMPLATE_DIR")
            .env_remove("RUST_LOG");
        cmd
    }

    /// `create-ock` running inside this workspace with the bundled template.
    pub fn cmd(&self) -> Command {
        self.cmd_for(&assert_cmd::cargo::cargo_bin("create-ock"))
    }

    /// `create-ock` running inside this workspace against the on-disk `template`.
    pub fn cmd_with_template(&self, template: &Path) -> Command {
        let mut cmd = self.cmd();
        cmd.env("CREATE_OCK_TEMPLATE_DIR", template);
        cmd
    }

    /// Reads the `name` field of `<cwd>/<project>/package.json`.
    pub fn manifest_name(&self, project: &str) -> String {
        let raw = fs::read_to_string(self.path().join(project).join("package.json"))
            .expect("package.json should exist");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON");
        value["name"].as_str().expect("name is a string").to_string()
    }
}

/// Writes `content` to `path`, creating parents.
pub fn create_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
