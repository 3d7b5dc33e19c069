//! CLI command definitions.

pub mod items;
pub mod tables;

use clap::{Parser, Subcommand, ValueEnum};

/// Operator CLI for dynamap tables.
#[derive(Debug, Parser)]
#[command(name = "dynamap")]
#[command(about = "Inspect tables and items on a DynamoDB-style service", long_about = None)]
pub struct Cli {
    /// Service endpoint.
    #[arg(long, env = "DYNAMAP_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Table management.
    Tables(tables::TablesCommand),
    /// Item inspection.
    Items(items::ItemsCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "dynamap",
            "--endpoint",
            "http://localhost:8000/",
            "--format",
            "json",
            "--quiet",
            "tables",
            "list",
        ])
        .unwrap();

        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:8000/"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Tables(tables::TablesCommand {
                action: tables::TablesAction::List { limit: None }
            })
        ));
    }

    #[test]
    fn test_parse_items_get() {
        let cli = Cli::try_parse_from([
            "dynamap",
            "items",
            "get",
            "pages",
            "--key",
            r#"{"URL":{"S":"a"}}"#,
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Items(items::ItemsCommand {
                action: items::ItemsAction::Get { table, key },
            }) => {
                assert_eq!(table, "pages");
                assert_eq!(key, r#"{"URL":{"S":"a"}}"#);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_get_requires_key() {
        assert!(Cli::try_parse_from(["dynamap", "items", "get", "pages"]).is_err());
    }
}
