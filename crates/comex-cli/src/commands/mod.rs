//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use comex_core::process::{Direction, ProcessFilter};
use comex_core::{Config, Session};

pub mod board;
pub mod client;
pub mod init;
pub mod process;

/// COMEX - customs process board
#[derive(Parser)]
#[command(name = "comex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a project configuration
    Init(init::InitArgs),

    /// Display the process board
    Board(board::BoardArgs),

    /// List the pipeline stages
    Stages,

    /// Manage processes
    #[command(subcommand)]
    Process(process::ProcessCommands),

    /// Manage clients and their suppliers
    #[command(subcommand)]
    Client(client::ClientCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let project_dir = match self.project {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        match self.command {
            Commands::Init(args) => init::execute(args, &project_dir).await,
            Commands::Board(args) => board::execute(args, &project_dir).await,
            Commands::Stages => {
                crate::output::print_stages();
                Ok(())
            }
            Commands::Process(cmd) => process::execute(cmd, &project_dir).await,
            Commands::Client(cmd) => client::execute(cmd, &project_dir).await,
        }
    }
}

/// Search and direction flags shared by listing commands.
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Case-insensitive text matched against reference, counterpart,
    /// acquirer, supplier and client reference
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only imports or only exports
    #[arg(short, long)]
    pub direction: Option<Direction>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> ProcessFilter {
        ProcessFilter {
            search: self.search.clone(),
            direction: self.direction,
        }
    }
}

/// Open the configured session for a project.
pub async fn open_session(project_dir: &Path) -> Result<Session> {
    let config = Config::load_for_project(project_dir)?;
    tracing::debug!(backend = %config.backend, project = %project_dir.display(), "Opening session");
    Ok(Session::open(&config, project_dir).await?)
}

/// Ask before a destructive or cross-column action unless `assume_yes`.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
