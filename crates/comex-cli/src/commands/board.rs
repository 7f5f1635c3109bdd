//! Board display.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::{open_session, FilterArgs};
use crate::output;

#[derive(Args)]
pub struct BoardArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print the board as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: BoardArgs, project_dir: &Path) -> Result<()> {
    let session = open_session(project_dir).await?;
    let board = session.processes.board(&args.filter.to_filter());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        output::print_board(&board);
    }
    Ok(())
}
