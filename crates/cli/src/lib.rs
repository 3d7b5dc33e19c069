//! dynamap_cli - operator CLI for dynamap tables.

pub mod cli;
pub mod error;
pub mod output;

pub use error::{CliError, Result};
