//! CLI command implementations

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{Engine, IdAllocator};
use crate::ingest::{transform_sms, RawSms};
use crate::observability::Logger;
use crate::rest_api::{self, Credentials};
use crate::store::SnapshotStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            snapshot,
            bind,
            username,
            password,
        } => serve(snapshot, &bind, Credentials::new(username, password)),
        Command::Import { input, snapshot } => import(&input, snapshot),
    }
}

/// Open the engine over the snapshot and serve the REST API
fn serve(snapshot: PathBuf, bind: &str, credentials: Credentials) -> CliResult<()> {
    let engine = Engine::open(SnapshotStore::new(snapshot))
        .map_err(|e| CliError::boot_failed(e.to_string()))?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("failed to start runtime: {}", e)))?;

    runtime
        .block_on(rest_api::serve(engine, credentials, bind))
        .map_err(|e| CliError::io_error(format!("server failed: {}", e)))
}

/// Transform a raw SMS dump into a snapshot
fn import(input: &Path, snapshot: PathBuf) -> CliResult<()> {
    let bytes = fs::read(input)
        .map_err(|e| CliError::invalid_input(format!("cannot read {}: {}", input.display(), e)))?;

    let raw: Vec<RawSms> = serde_json::from_slice(&bytes).map_err(|e| {
        CliError::invalid_input(format!("{} is not a raw SMS dump: {}", input.display(), e))
    })?;

    let mut records = transform_sms(&raw);

    // Imports start a fresh id space.
    let mut ids = IdAllocator::new();
    for record in &mut records {
        let id = ids.next_id(&[]);
        IdAllocator::assign(record, id);
    }

    SnapshotStore::new(snapshot.clone())
        .save(&records)
        .map_err(|e| CliError::io_error(e.to_string()))?;

    let mut by_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &records {
        let kind = record
            .get("transaction_type")
            .and_then(|v| v.as_str())
            .unwrap_or("other");
        *by_kind.entry(kind).or_default() += 1;
    }

    let parsed = raw.len().to_string();
    let imported = records.len().to_string();
    Logger::info(
        "import_complete",
        &[
            ("input", &input.display().to_string()),
            ("snapshot", &snapshot.display().to_string()),
            ("messages", parsed.as_str()),
            ("records", imported.as_str()),
        ],
    );
    for (kind, count) in &by_kind {
        Logger::info(
            "import_kind",
            &[("kind", *kind), ("count", &count.to_string())],
        );
    }

    Ok(())
}
