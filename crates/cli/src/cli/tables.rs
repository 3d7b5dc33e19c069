//! Table CLI commands.

use clap::{Parser, Subcommand};

/// Table management commands.
#[derive(Debug, Parser)]
pub struct TablesCommand {
    #[command(subcommand)]
    pub action: TablesAction,
}

/// Available table actions.
#[derive(Debug, Subcommand)]
pub enum TablesAction {
    /// List table names.
    List {
        /// Maximum number of names to return.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Describe a table.
    Describe {
        /// Table name.
        name: String,
    },
    /// Delete a table.
    Delete {
        /// Table name.
        name: String,
    },
}
