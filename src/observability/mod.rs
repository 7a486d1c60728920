//! Observability for ledgerdb
//!
//! Structured JSON logging only: one line per event, synchronous, with
//! deterministic key ordering so log output diffs cleanly between runs.

mod logger;

pub use logger::{Logger, Severity};
