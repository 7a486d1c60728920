//! In-memory record collection
//!
//! `RecordStore` pairs the live ordered collection with the snapshot it was
//! loaded from. Mutations go through `replace` (whole-collection swap); the
//! engine stages a modified copy, persists it, and only then swaps it in.

use super::errors::StoreResult;
use super::record::Transaction;
use super::snapshot::SnapshotStore;

/// The ordered, in-memory collection of transaction records.
#[derive(Debug)]
pub struct RecordStore {
    snapshot: SnapshotStore,
    records: Vec<Transaction>,
}

impl RecordStore {
    /// Open the store by loading the snapshot.
    ///
    /// A missing or malformed snapshot surfaces as a `StoreError`; the caller
    /// decides whether that is fatal (serving) or expected (first import).
    pub fn open(snapshot: SnapshotStore) -> StoreResult<Self> {
        let records = snapshot.load()?;
        Ok(Self { snapshot, records })
    }

    /// Read-only view of the record sequence, in store order
    pub fn all(&self) -> &[Transaction] {
        &self.records
    }

    /// Atomically swap in a new record sequence.
    ///
    /// The caller is expected to have persisted `records` first; see
    /// `engine::Engine::commit`.
    pub fn replace(&mut self, records: Vec<Transaction>) {
        self.records = records;
    }

    /// Flush the current collection to the snapshot
    pub fn persist(&self) -> StoreResult<()> {
        self.snapshot.save(&self.records)
    }

    /// The snapshot backing this store
    pub fn snapshot(&self) -> &SnapshotStore {
        &self.snapshot
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
