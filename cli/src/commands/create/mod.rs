//! # create-ock Create Command
//!
//! File: cli/src/commands/create/mod.rs
//!
//! ## Overview
//!
//! This module implements the scaffolder itself: it asks for a project name,
//! copies the template tree into `<cwd>/<project name>`, stamps the package
//! name into the generated `package.json`, and tells the user what to run next.
//!
//! ## Architecture
//!
//! The command moves through three stages:
//! 1. **Prompting** (`prompt_names`): "Project name:" is re-asked until the
//!    target directory is absent or empty. "Package name:" is only asked when
//!    the project name is not already a valid package name; the outcome is a
//!    `PackageNameChoice`.
//! 2. **Copying** (`scaffold`): the template is copied with the rules in
//!    `common::fs::copy`, either from the bundle compiled into the binary or
//!    from a directory given by `--template` or the config.
//! 3. **Finalizing** (`scaffold` + `next_steps`): the manifest's `name` is
//!    rewritten and the next-step instructions are printed.
//!
//! The working directory and template location travel in an explicit
//! `InitContext`, and all disk access goes through `FileSystem`, so the stages
//! run unchanged against the in-memory filesystem in tests.
//!
//! Cancelling a prompt (Ctrl+C, or EOF on stdin) ends the command with
//! `CreateError::Cancelled` before anything is written. A failure while
//! copying leaves the partially written project in place; the error names it
//! so the user can remove it before retrying.
//!
//! ## Examples
//!
//! ```bash
//! create-ock
//! ? Project name: › (my-onchainkit-app) My Cool App!!
//! ? Package name: › (my-cool-app)
//!
//! Creating project in /home/me/My Cool App!!...
//!
//! Done. Now run:
//!
//!   cd My Cool App!!
//!   npm install
//!   npm run dev
//! ```
//!
pub mod manifest;
pub mod package_name;

use crate::common::fs::copy::{self, CopyRules, CopySummary};
use crate::common::fs::embedded::BundledTemplate;
use crate::common::fs::io::{self as fsio, FileSystem, StdFileSystem};
use crate::common::ui::prompts::{self, Prompter, TextPrompt, Validation};
use crate::core::config::{self, TemplateSource};
use crate::core::error::{CreateError, Result};
use anyhow::{anyhow, Context};
use clap::Parser;
use package_name::{is_valid_package_name, to_valid_package_name};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Shown when the chosen project directory already has content.
pub const DIRECTORY_NOT_EMPTY: &str =
    "Directory already exists and is not empty. Please choose a different name.";
/// Shown when a typed package name fails the grammar.
pub const INVALID_PACKAGE_NAME: &str = "Invalid package.json name";

/// Command-line options for the scaffolder.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Template directory to copy instead of the bundled Next.js template.
    #[arg(long, value_name = "DIR", env = "CREATE_OCK_TEMPLATE_DIR")]
    pub template: Option<PathBuf>,
}

/// Everything the stages need to know about their surroundings.
#[derive(Debug, Clone)]
pub struct InitContext {
    /// Directory the project is created relative to.
    pub cwd: PathBuf,
    pub template: TemplateSource,
    /// Suggested answer to "Project name:".
    pub default_project_name: String,
}

impl InitContext {
    /// Destination root for `project_name`, with `.` components removed.
    ///
    /// The name is always taken relative to `cwd`: a leading root or drive
    /// prefix is dropped, so `/elsewhere/app` lands in `<cwd>/elsewhere/app`.
    pub fn project_root(&self, project_name: &str) -> PathBuf {
        let relative: PathBuf = Path::new(project_name)
            .components()
            .filter(|c| matches!(c, Component::Normal(_) | Component::ParentDir))
            .collect();
        self.cwd.join(relative).components().collect()
    }
}

/// How the package name was decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageNameChoice {
    /// The project name was already valid; no question was asked.
    Skipped(String),
    /// The user answered "Package name:".
    Prompted(String),
}

/// Answers gathered during the prompting stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNames {
    pub project_name: String,
    pub package_name: PackageNameChoice,
}

impl ProjectNames {
    /// The name written into `package.json`.
    pub fn resolved_package_name(&self) -> String {
        match &self.package_name {
            PackageNameChoice::Prompted(name) if !name.is_empty() => name.clone(),
            PackageNameChoice::Prompted(_) => to_valid_package_name(&self.project_name),
            PackageNameChoice::Skipped(default) => default.clone(),
        }
    }
}

/// Result of a completed scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffolded {
    pub root: PathBuf,
    pub package_name: String,
    pub summary: CopySummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Prompting,
    Copying,
    Finalizing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Prompting => "prompting",
            Stage::Copying => "copying",
            Stage::Finalizing => "finalizing",
        })
    }
}

/// # Handle Create Command (`handle_create`)
///
/// Entry point wired to the binary. Resolves configuration and the template
/// source, then runs the prompting stage on the blocking pool (so Ctrl+C
/// can interrupt it), and finally copies and finalizes the project.
pub async fn handle_create(args: CreateArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let cfg = config::load_config(&cwd).context("Failed to load configuration")?;
    let template = config::resolve_template(&cfg, args.template.as_deref());
    if let TemplateSource::Directory(dir) = &template {
        if !StdFileSystem.is_dir(dir) {
            return Err(anyhow!(CreateError::TemplateNotFound { path: dir.clone() }));
        }
    }
    debug!("Using template: {}", template);

    let ctx = InitContext {
        cwd,
        default_project_name: cfg.default_project_name().to_string(),
        template,
    };

    let prompt_ctx = ctx.clone();
    let names = tokio::select! {
        joined = tokio::task::spawn_blocking(move || {
            let mut prompter = prompts::stdio_prompter();
            prompt_names(prompter.as_mut(), &StdFileSystem, &prompt_ctx)
        }) => joined.context("Prompt task failed")??,
        _ = interrupted() => return Err(CreateError::Cancelled.into()),
    };

    let root = ctx.project_root(&names.project_name);
    println!("\nCreating project in {}...", root.display());

    let scaffold_ctx = ctx.clone();
    let done =
        tokio::task::spawn_blocking(move || scaffold(&StdFileSystem, &scaffold_ctx, &names))
            .await
            .context("Scaffold task failed")??;

    println!("\nDone. Now run:\n");
    for line in next_steps(&ctx.cwd, &done.root) {
        println!("  {}", line);
    }
    Ok(())
}

/// Resolves once Ctrl+C is received. Never resolves if the handler can't be installed.
async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C while prompting"),
        Err(e) => {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// # Prompting Stage (`prompt_names`)
///
/// Asks for the project name (re-asking while `<cwd>/<name>` is occupied) and,
/// only when the project name is not itself a valid package name, for the
/// package name.
pub fn prompt_names(
    prompter: &mut dyn Prompter,
    fs: &dyn FileSystem,
    ctx: &InitContext,
) -> Result<ProjectNames> {
    debug!("Stage: {}", Stage::Prompting);

    let validate_project = |value: &str| -> Validation {
        let target = ctx.project_root(value);
        match fsio::is_available_target(fs, &target) {
            Ok(true) => Ok(()),
            Ok(false) => Err(DIRECTORY_NOT_EMPTY.to_string()),
            Err(e) => Err(format!("Cannot inspect {}: {:#}", target.display(), e)),
        }
    };
    let project_name = prompter
        .text(
            &TextPrompt {
                message: "Project name:",
                initial: &ctx.default_project_name,
            },
            &validate_project,
        )
        .with_context(|| format!("{} failed", Stage::Prompting))?;

    let package_name = if is_valid_package_name(&project_name) {
        debug!("'{}' is a valid package name, not asking", project_name);
        PackageNameChoice::Skipped(to_valid_package_name(&project_name))
    } else {
        let suggested = to_valid_package_name(&project_name);
        let validate_package = |value: &str| -> Validation {
            if is_valid_package_name(value) {
                Ok(())
            } else {
                Err(INVALID_PACKAGE_NAME.to_string())
            }
        };
        let answer = prompter
            .text(
                &TextPrompt {
                    message: "Package name:",
                    initial: &suggested,
                },
                &validate_package,
            )
            .with_context(|| format!("{} failed", Stage::Prompting))?;
        PackageNameChoice::Prompted(answer)
    };

    Ok(ProjectNames {
        project_name,
        package_name,
    })
}

/// # Copying and Finalizing Stages (`scaffold`)
///
/// Copies the template into the project root and rewrites the manifest name.
/// An on-disk template is read through `fs`; the bundled one from the binary.
/// Re-checks that the root is still available so a directory filled in since
/// the prompt is never merged into.
pub fn scaffold(
    fs: &dyn FileSystem,
    ctx: &InitContext,
    names: &ProjectNames,
) -> Result<Scaffolded> {
    let root = ctx.project_root(&names.project_name);

    debug!("Stage: {}", Stage::Copying);
    if !fsio::is_available_target(fs, &root)? {
        return Err(anyhow!(CreateError::FileSystem(format!(
            "{} ({})",
            DIRECTORY_NOT_EMPTY,
            root.display()
        ))));
    }
    let (source_fs, source_dir): (&dyn FileSystem, &Path) = match &ctx.template {
        TemplateSource::Bundled => (&BundledTemplate as &dyn FileSystem, Path::new("")),
        TemplateSource::Directory(dir) => (fs, dir.as_path()),
    };
    let summary = copy::copy_dir(source_fs, source_dir, fs, &root, &CopyRules::default())
        .with_context(|| {
            format!(
                "{} failed; '{}' may be partially written and should be removed before retrying",
                Stage::Copying,
                root.display()
            )
        })?;

    debug!("Stage: {}", Stage::Finalizing);
    let package_name = names.resolved_package_name();
    manifest::set_package_name(fs, &root, &package_name)
        .with_context(|| format!("{} failed", Stage::Finalizing))?;

    info!(
        "Scaffolded '{}' as package '{}' ({} files)",
        root.display(),
        package_name,
        summary.files_copied
    );
    Ok(Scaffolded {
        root,
        package_name,
        summary,
    })
}

/// Next-step commands: `cd` (only when the project is not the working
/// directory), then install and run.
pub fn next_steps(cwd: &Path, root: &Path) -> Vec<String> {
    let mut steps = Vec::new();
    if root != cwd {
        let display = pathdiff::diff_paths(root, cwd)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| root.display().to_string());
        steps.push(format!("cd {}", display));
    }
    steps.push("npm install".to_string());
    steps.push("npm run dev".to_string());
    steps
}
