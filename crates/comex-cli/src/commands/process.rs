//! Process management commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use comex_core::process::{Direction, NewProcess, Stage, TransportMode};
use comex_core::ComexError;

use super::{confirm, open_session, FilterArgs};
use crate::output;

#[derive(Subcommand)]
pub enum ProcessCommands {
    /// List processes in board order
    List(ListArgs),

    /// Show a single process
    Show(ShowArgs),

    /// Create a new process
    New(NewProcessArgs),

    /// Edit the fields of a process
    Edit(EditProcessArgs),

    /// Delete a process
    Delete(DeleteArgs),

    /// Change a process's stage without reordering
    Stage(StageArgs),

    /// Move a process on the board (reorder, or change column)
    Move(MoveArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Process ID
    pub id: String,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct NewProcessArgs {
    /// Process reference code
    pub reference: String,

    /// Direction (import, export)
    #[arg(short, long, default_value = "import")]
    pub direction: Direction,

    /// Importer for imports, exporter for exports
    #[arg(short, long, default_value = "")]
    pub counterpart: String,

    /// Acquirer name
    #[arg(long, default_value = "")]
    pub acquirer: String,

    /// Supplier name
    #[arg(long, default_value = "")]
    pub supplier: String,

    /// Client's own reference
    #[arg(long, default_value = "")]
    pub client_ref: String,

    /// Transport mode (sea, air, road)
    #[arg(short, long, default_value = "sea")]
    pub transport: TransportMode,

    /// Freight forwarder
    #[arg(long)]
    pub agent: Option<String>,

    /// Initial stage (defaults to awaiting-shipment)
    #[arg(long)]
    pub stage: Option<Stage>,
}

#[derive(Args)]
pub struct EditProcessArgs {
    /// Process ID
    pub id: String,

    #[arg(long)]
    pub reference: Option<String>,

    #[arg(short, long)]
    pub direction: Option<Direction>,

    #[arg(short, long)]
    pub counterpart: Option<String>,

    #[arg(long)]
    pub acquirer: Option<String>,

    #[arg(long)]
    pub supplier: Option<String>,

    #[arg(long)]
    pub client_ref: Option<String>,

    #[arg(short, long)]
    pub transport: Option<TransportMode>,

    /// Freight forwarder
    #[arg(long, conflicts_with = "clear_agent")]
    pub agent: Option<String>,

    /// Remove the freight forwarder
    #[arg(long)]
    pub clear_agent: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Process ID
    pub id: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct StageArgs {
    /// Process ID
    pub id: String,

    /// Target stage
    pub stage: Stage,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Process ID
    pub id: String,

    /// Target stage (the current one to reorder in place)
    pub stage: Stage,

    /// Zero-based position in the target column (defaults to the end)
    #[arg(long)]
    pub position: Option<usize>,

    /// Skip confirmation when changing column
    #[arg(short, long)]
    pub yes: bool,
}

pub async fn execute(cmd: ProcessCommands, project_dir: &Path) -> Result<()> {
    let mut session = open_session(project_dir).await?;
    let store = &mut session.processes;

    match cmd {
        ProcessCommands::List(args) => {
            let processes = args.filter.to_filter().apply(&store.list());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&processes)?);
            } else {
                output::print_processes_table(&processes);
            }
        }

        ProcessCommands::Show(args) => {
            let process = store
                .get(&args.id)
                .ok_or_else(|| ComexError::ProcessNotFound(args.id.clone()))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(process)?);
            } else {
                output::print_process(process);
            }
        }

        ProcessCommands::New(args) => {
            let process = store
                .create(NewProcess {
                    reference: args.reference,
                    direction: args.direction,
                    counterpart: args.counterpart,
                    acquirer: args.acquirer,
                    supplier: args.supplier,
                    client_reference: args.client_ref,
                    transport: args.transport,
                    stage: args.stage,
                    freight_agent: args.agent,
                })
                .await;

            println!(
                "{} Created process: {} ({}) in {}",
                "✓".green().bold(),
                process.reference.cyan(),
                process.id.dimmed(),
                process.stage.title()
            );
        }

        ProcessCommands::Edit(args) => {
            let mut process = store
                .get(&args.id)
                .cloned()
                .ok_or_else(|| ComexError::ProcessNotFound(args.id.clone()))?;

            let counterpart = args
                .counterpart
                .unwrap_or_else(|| process.counterpart().to_string());
            if let Some(direction) = args.direction {
                process.direction = direction;
            }
            process.set_counterpart(counterpart);

            if let Some(reference) = args.reference {
                process.reference = reference;
            }
            if let Some(acquirer) = args.acquirer {
                process.acquirer = acquirer;
            }
            if let Some(supplier) = args.supplier {
                process.supplier = supplier;
            }
            if let Some(client_ref) = args.client_ref {
                process.client_reference = client_ref;
            }
            if let Some(transport) = args.transport {
                process.transport = transport;
            }
            if args.clear_agent {
                process.freight_agent = None;
            } else if let Some(agent) = args.agent {
                process.freight_agent = Some(agent);
            }

            store.update(process).await;
            println!("{} Updated process {}", "✓".green().bold(), args.id.dimmed());
        }

        ProcessCommands::Delete(args) => {
            let process = store
                .get(&args.id)
                .ok_or_else(|| ComexError::ProcessNotFound(args.id.clone()))?;
            let prompt = format!("Delete process {}?", process.reference);
            if !confirm(&prompt, args.yes)? {
                println!("{}", "Cancelled.".dimmed());
                return Ok(());
            }

            store.delete(&args.id).await;
            println!("{} Deleted process {}", "✓".green().bold(), args.id.dimmed());
        }

        ProcessCommands::Stage(args) => {
            if store.get(&args.id).is_none() {
                return Err(ComexError::ProcessNotFound(args.id).into());
            }
            store.set_stage(&args.id, args.stage).await;
            println!(
                "{} Moved process {} to {}",
                "✓".green().bold(),
                args.id.dimmed(),
                args.stage.title().cyan()
            );
        }

        ProcessCommands::Move(args) => {
            let process = store
                .get(&args.id)
                .cloned()
                .ok_or_else(|| ComexError::ProcessNotFound(args.id.clone()))?;
            let index = args.position.unwrap_or(usize::MAX);

            if process.stage == args.stage {
                store.reorder_within_stage(&args.id, index, args.stage).await;
            } else {
                let prompt = format!(
                    "Move {} from {} to {}?",
                    process.reference,
                    process.stage.title(),
                    args.stage.title()
                );
                if !confirm(&prompt, args.yes)? {
                    println!("{}", "Cancelled.".dimmed());
                    return Ok(());
                }
                store.change_stage_and_reorder(&args.id, args.stage, index).await;
            }

            let board = store.board(&Default::default());
            let position = board
                .column(args.stage)
                .and_then(|c| c.processes.iter().position(|p| p.id == args.id))
                .map(|i| i + 1)
                .unwrap_or_default();
            println!(
                "{} {} is now #{} in {}",
                "✓".green().bold(),
                process.reference.cyan(),
                position,
                args.stage.title()
            );
        }
    }

    Ok(())
}
