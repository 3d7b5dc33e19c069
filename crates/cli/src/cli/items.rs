//! Item CLI commands.

use clap::{Parser, Subcommand};

use dynamap::Key;

use crate::error::{CliError, Result};

/// Item inspection commands.
#[derive(Debug, Parser)]
pub struct ItemsCommand {
    #[command(subcommand)]
    pub action: ItemsAction,
}

/// Available item actions.
#[derive(Debug, Subcommand)]
pub enum ItemsAction {
    /// Scan a table.
    Scan {
        /// Table name.
        table: String,
        /// Maximum number of items to evaluate.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get one item by primary key.
    Get {
        /// Table name.
        table: String,
        /// Primary key in wire form, e.g. `{"Host":{"S":"localhost"}}`.
        #[arg(long)]
        key: String,
    },
}

/// Parses a key given on the command line.
pub fn parse_key(input: &str) -> Result<Key> {
    let key: Key = serde_json::from_str(input).map_err(|e| CliError::InvalidKey {
        input: input.to_string(),
        reason: e.to_string(),
    })?;
    if key.is_empty() {
        return Err(CliError::InvalidKey {
            input: input.to_string(),
            reason: "key has no attributes".to_string(),
        });
    }
    Ok(key)
}
