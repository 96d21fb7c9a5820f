//! # create-ock Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `create-ock` scaffolder.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Running the create command and mapping its outcome to an exit status
//!
//! ## Exit Status
//!
//! - `0`: the project was created.
//! - `1`: a prompt was cancelled, or any error reached this level.
//!
//! ## Examples
//!
//! ```bash
//! # Scaffold interactively in the current directory
//! create-ock
//!
//! # Use a different template and show info-level logs
//! create-ock -v --template ~/templates/next
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // The create command
mod common; // Shared utilities (fs, ui)
mod core; // Core infrastructure (errors, config)

use crate::core::error::{is_cancellation, CreateError};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "create-ock",
    about = "Create a new OnchainKit app",
    long_about = "Interactively scaffold a new OnchainKit Next.js project in the current \
                  directory.\nPrompts for a project name and, if needed, a package name.",
    version
)]
struct Cli {
    #[command(flatten)]
    create: commands::create::CreateArgs,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = commands::create::handle_create(cli.create).await {
        if is_cancellation(&e) {
            println!("\n{}", CreateError::Cancelled);
        } else {
            tracing::error!("Command execution failed: {:?}", e);
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
