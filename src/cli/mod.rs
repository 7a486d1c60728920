//! CLI module for ledgerdb
//!
//! Provides command-line interface for:
//! - serve: Open the snapshot and serve the REST API
//! - import: Transform a raw SMS dump into a fresh snapshot

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command};
pub use errors::{CliError, CliResult};
