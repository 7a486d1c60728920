//! CLI argument definitions using clap
//!
//! Commands:
//! - ledgerdb serve --snapshot <path> --bind <addr>
//! - ledgerdb import --input <raw_sms.json> --snapshot <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ledgerdb - A record-oriented retrieval engine for mobile-money transactions
#[derive(Parser, Debug)]
#[command(name = "ledgerdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the transaction API over HTTP
    Serve {
        /// Path to the snapshot file
        #[arg(long, default_value = "./api_transactions.json")]
        snapshot: PathBuf,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: String,

        /// Basic auth username
        #[arg(long, default_value = "admin")]
        username: String,

        /// Basic auth password
        #[arg(long, default_value = "password")]
        password: String,
    },

    /// Transform a raw SMS dump into a snapshot
    Import {
        /// Path to the raw SMS JSON dump
        #[arg(long)]
        input: PathBuf,

        /// Path to write the snapshot to
        #[arg(long, default_value = "./api_transactions.json")]
        snapshot: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
