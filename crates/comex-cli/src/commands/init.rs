//! Project initialization.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;

use comex_core::config::BackendKind;
use comex_core::{Config, Session};

#[derive(Args)]
pub struct InitArgs {
    /// Storage backend (file, redis, memory)
    #[arg(long, default_value = "file")]
    pub backend: BackendKind,

    /// Redis server URL
    #[arg(long)]
    pub redis_url: Option<String>,

    /// Start with an empty board instead of demonstration processes
    #[arg(long)]
    pub no_seed: bool,

    /// Overwrite an existing configuration
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: InitArgs, project_dir: &Path) -> Result<()> {
    let path = Config::path_for(project_dir);
    if path.exists() && !args.force {
        bail!(
            "Configuration already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let mut config = Config {
        backend: args.backend,
        seed_demo_data: !args.no_seed,
        ..Default::default()
    };
    if let Some(url) = args.redis_url {
        config.redis_url = url;
    }
    config.save(&path)?;

    println!(
        "{} Wrote {} ({} backend)",
        "✓".green().bold(),
        path.display().to_string().cyan(),
        config.backend
    );

    // Opening once creates (and seeds) the collections.
    let session = Session::open(&config, project_dir).await?;
    println!(
        "{} {} process(es), {} client(s)",
        "→".blue().bold(),
        session.processes.list().len(),
        session.clients.list().len()
    );

    Ok(())
}
