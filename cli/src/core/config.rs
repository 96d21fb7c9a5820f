//! # create-ock Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads the optional TOML configuration that tunes the scaffolder: where the
//! template tree lives and which project name the first prompt suggests.
//! Nothing here is required; with no files present the template compiled into
//! the binary and the stock default name are used.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.create-ock.toml` in the working directory or its
//!    ancestors (the search stops at a directory containing `.git`)
//! 2. User-specific `<config dir>/create-ock/config.toml`
//! 3. Default values defined in the code
//!
//! Each layer only overrides the keys it actually sets, so a project file that
//! names the stock default still wins over a user file that names another.
//!
//! The `--template` flag (or `CREATE_OCK_TEMPLATE_DIR`) beats all of these and
//! is applied by `resolve_template`.
//!
//! ## Examples
//!
//! ```toml
//! [template]
//! directory = "~/templates/onchainkit-next"
//!
//! [defaults]
//! project_name = "my-dapp"
//! ```
//!
use crate::core::error::{CreateError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Suggested project name when neither config nor user supplies one.
pub const DEFAULT_PROJECT_NAME: &str = "my-onchainkit-app";

const PROJECT_CONFIG_FILENAME: &str = ".create-ock.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub template: TemplateConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Where the template tree is read from.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Template directory (can use ~). Expanded during load.
    pub directory: Option<String>,
}

/// Defaults offered by the interactive prompts.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Suggested answer to "Project name:". Unset means `DEFAULT_PROJECT_NAME`.
    pub project_name: Option<String>,
}

impl Config {
    /// The project name the first prompt suggests.
    pub fn default_project_name(&self) -> &str {
        self.defaults
            .project_name
            .as_deref()
            .unwrap_or(DEFAULT_PROJECT_NAME)
    }
}

/// Where the template tree is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The Next.js template compiled into the binary.
    Bundled,
    /// A template tree on disk.
    Directory(PathBuf),
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Bundled => f.write_str("bundled Next.js template"),
            TemplateSource::Directory(dir) => write!(f, "{}", dir.display()),
        }
    }
}

/// Loads, merges, expands and validates configuration relative to `cwd`.
pub fn load_config(cwd: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(cwd)?;
    let mut merged = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged);
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

/// Picks the template: explicit override, then config, then the bundled tree.
pub fn resolve_template(cfg: &Config, cli_override: Option<&Path>) -> TemplateSource {
    if let Some(dir) = cli_override {
        debug!("Using template directory from command line: {}", dir.display());
        let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
        return TemplateSource::Directory(PathBuf::from(expanded));
    }
    match &cfg.template.directory {
        Some(dir) => TemplateSource::Directory(PathBuf::from(dir)),
        None => TemplateSource::Bundled,
    }
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "OnchainKit", "create-ock") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!("User configuration file not found at {}", config_path.display());
        Ok(None)
    }
}

fn load_project_config(cwd: &Path) -> Result<Option<Config>> {
    match find_project_config_path(cwd) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in {} or ancestors.", PROJECT_CONFIG_FILENAME, cwd.display());
            Ok(None)
        }
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let candidate = path.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content).map_err(|e| {
        anyhow!(CreateError::Config(e.to_string()))
            .context(format!("Failed to parse TOML from file: {}", path.display()))
    })
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    Config {
        template: TemplateConfig {
            directory: project.template.directory.or(user.template.directory),
        },
        defaults: DefaultsConfig {
            project_name: project.defaults.project_name.or(user.defaults.project_name),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(dir) = config.template.directory.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded template directory: {}", dir);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(name) = &config.defaults.project_name {
        if name.trim().is_empty() {
            return Err(anyhow!(CreateError::Config(
                "defaults.project_name cannot be empty".to_string()
            )));
        }
    }
    if let Some(dir) = &config.template.directory {
        if dir.trim().is_empty() {
            return Err(anyhow!(CreateError::Config(
                "template.directory cannot be empty".to_string()
            )));
        }
    }
    Ok(())
}
