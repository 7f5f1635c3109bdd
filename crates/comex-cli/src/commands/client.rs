//! Client and supplier registry commands.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;

use comex_core::ComexError;

use super::{confirm, open_session};
use crate::output;

#[derive(Subcommand)]
pub enum ClientCommands {
    /// List clients with their suppliers
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a new client
    New {
        /// Client name
        name: String,

        /// Tax registration number
        tax_id: String,
    },

    /// Edit a client's name or tax number
    Edit {
        /// Client ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        tax_id: Option<String>,
    },

    /// Delete a client and its suppliers
    Delete {
        /// Client ID
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Add a supplier to a client
    SupplierAdd {
        /// Client ID
        client_id: String,

        /// Supplier name
        name: String,
    },

    /// Remove a supplier from a client
    SupplierRemove {
        /// Client ID
        client_id: String,

        /// Supplier ID
        supplier_id: String,
    },
}

pub async fn execute(cmd: ClientCommands, project_dir: &Path) -> Result<()> {
    let mut session = open_session(project_dir).await?;
    let store = &mut session.clients;

    match cmd {
        ClientCommands::List { json } => {
            let clients = store.list();
            if json {
                println!("{}", serde_json::to_string_pretty(&clients)?);
            } else {
                output::print_clients(&clients);
            }
        }

        ClientCommands::New { name, tax_id } => {
            let client = store.create(&name, &tax_id).await;
            println!(
                "{} Registered client: {} ({})",
                "✓".green().bold(),
                client.name.cyan(),
                client.id.dimmed()
            );
        }

        ClientCommands::Edit { id, name, tax_id } => {
            let current = store
                .get(&id)
                .ok_or_else(|| ComexError::ClientNotFound(id.clone()))?;
            let name = name.unwrap_or_else(|| current.name.clone());
            let tax_id = tax_id.unwrap_or_else(|| current.tax_id.clone());

            store.update(&id, &name, &tax_id).await;
            println!("{} Updated client {}", "✓".green().bold(), id.dimmed());
        }

        ClientCommands::Delete { id, yes } => {
            let client = store
                .get(&id)
                .ok_or_else(|| ComexError::ClientNotFound(id.clone()))?;
            let prompt = format!(
                "Delete client {} and its {} supplier(s)?",
                client.name,
                client.suppliers.len()
            );
            if !confirm(&prompt, yes)? {
                println!("{}", "Cancelled.".dimmed());
                return Ok(());
            }

            store.delete(&id).await;
            println!("{} Deleted client {}", "✓".green().bold(), id.dimmed());
        }

        ClientCommands::SupplierAdd { client_id, name } => {
            if store.get(&client_id).is_none() {
                return Err(ComexError::ClientNotFound(client_id).into());
            }
            let clients = store.add_supplier(&client_id, &name).await;
            let supplier = clients
                .iter()
                .find(|c| c.id == client_id)
                .and_then(|c| c.suppliers.last());
            match supplier {
                Some(s) => println!(
                    "{} Added supplier {} ({})",
                    "✓".green().bold(),
                    s.name.cyan(),
                    s.id.dimmed()
                ),
                None => println!("{} Added supplier {}", "✓".green().bold(), name.cyan()),
            }
        }

        ClientCommands::SupplierRemove {
            client_id,
            supplier_id,
        } => {
            let client = store
                .get(&client_id)
                .ok_or_else(|| ComexError::ClientNotFound(client_id.clone()))?;
            if !client.suppliers.iter().any(|s| s.id == supplier_id) {
                return Err(ComexError::SupplierNotFound(supplier_id).into());
            }

            store.remove_supplier(&client_id, &supplier_id).await;
            println!(
                "{} Removed supplier {}",
                "✓".green().bold(),
                supplier_id.dimmed()
            );
        }
    }

    Ok(())
}
