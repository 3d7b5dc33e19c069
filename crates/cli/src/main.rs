//! dynamap CLI entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dynamap::remote::RemoteBackend;
use dynamap::{Backend, ClientConfig, GetItemOptions, ListTablesOptions, ScanOptions, TableRegistry};
use dynamap_cli::cli::items::{parse_key, ItemsAction};
use dynamap_cli::cli::tables::TablesAction;
use dynamap_cli::cli::{Cli, Commands, OutputFormat};
use dynamap_cli::output::format_output;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dynamap=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(endpoint) = cli.endpoint.clone() {
        config = config.with_endpoint(endpoint);
    }
    tracing::debug!(endpoint = %config.endpoint, "Using endpoint");

    // Raw item operations only, so no record types are registered.
    let backend = RemoteBackend::from_config(Arc::new(TableRegistry::new()), &config);

    match cli.command {
        Commands::Tables(tables_cmd) => match tables_cmd.action {
            TablesAction::List { limit } => {
                let result = backend
                    .list_tables(ListTablesOptions {
                        limit,
                        ..Default::default()
                    })
                    .await
                    .context("listing tables")?;
                println!("{}", format_output(&result, cli.format));
            }
            TablesAction::Describe { name } => {
                let table = backend
                    .describe_table(&name)
                    .await
                    .with_context(|| format!("describing table {name}"))?
                    .table;
                println!("{}", format_output(&table, cli.format));
            }
            TablesAction::Delete { name } => {
                let table = backend
                    .delete_table(&name)
                    .await
                    .with_context(|| format!("deleting table {name}"))?
                    .table_description;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&table, cli.format)),
                    OutputFormat::Pretty if !cli.quiet => println!("Deleting table {name}"),
                    OutputFormat::Pretty => {}
                }
            }
        },
        Commands::Items(items_cmd) => match items_cmd.action {
            ItemsAction::Scan { table, limit } => {
                let result = backend
                    .scan(
                        &table,
                        ScanOptions {
                            limit,
                            ..Default::default()
                        },
                    )
                    .await
                    .with_context(|| format!("scanning table {table}"))?;
                println!("{}", format_output(&result, cli.format));
            }
            ItemsAction::Get { table, key } => {
                let key = parse_key(&key)?;
                let result = backend
                    .get_item(&table, key, GetItemOptions::default())
                    .await
                    .with_context(|| format!("reading from table {table}"))?;
                match result.item {
                    Some(item) => println!("{}", format_output(&item, cli.format)),
                    None if !cli.quiet => eprintln!("No item found."),
                    None => {}
                }
            }
        },
    }

    Ok(())
}
