//! Record store subsystem for ledgerdb
//!
//! The store owns the ordered, in-memory collection of transaction records
//! and the JSON snapshot file it is loaded from and flushed to.
//!
//! # Design Principles
//!
//! - The snapshot is the only durable source of truth
//! - Whole-collection replace: mutations swap the full sequence, never patch in place
//! - Snapshot saves are atomic (write temp, fsync, rename)
//! - Extra record fields pass through unchanged
//!
//! # Invariants
//!
//! - Record `id`s are unique across the live collection
//! - A failed save leaves the in-memory collection untouched

mod collection;
mod errors;
mod record;
mod snapshot;

pub use collection::RecordStore;
pub use errors::{Severity, StoreError, StoreErrorCode, StoreResult};
pub use record::{RecordId, Transaction, MANDATORY_FIELDS};
pub use snapshot::SnapshotStore;
