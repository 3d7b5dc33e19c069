//! CLI error types.

use thiserror::Error;

/// Result type alias for the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors raised while interpreting command-line input.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid key {input:?}: {reason}")]
    InvalidKey { input: String, reason: String },
}
