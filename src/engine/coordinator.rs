//! Engine façade
//!
//! # API
//!
//! - `open(snapshot)` - Load the store and build all indexes
//! - `list(query)` - Conjunction of exact and range filters
//! - `get(id)` - Point lookup by record id
//! - `insert(fields)` / `update(id, partial)` / `delete(id)` - Mutations
//!
//! Every mutation follows the same cycle: stage a modified copy of the
//! collection, persist the staged copy, swap it in, rebuild the indexes. A
//! failure anywhere before the swap leaves the engine exactly as it was.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::index::{FieldIndex, RangeIndex};
use crate::store::{RecordId, RecordStore, SnapshotStore, Transaction};

use super::errors::{EngineError, EngineResult};
use super::ids::IdAllocator;
use super::query::{ListQuery, RangeFilter};

/// The index coordinator: record store plus derived lookup structures.
pub struct Engine {
    store: RecordStore,
    fields: FieldIndex,
    ranges: RangeIndex,
    /// id -> current position in the store, rebuilt with the indexes
    positions: HashMap<RecordId, usize>,
    ids: IdAllocator,
}

impl Engine {
    /// Open the engine over a snapshot with the default indexed fields
    pub fn open(snapshot: SnapshotStore) -> EngineResult<Self> {
        Self::open_with_fields(snapshot, FieldIndex::default_fields())
    }

    /// Open the engine over a snapshot with a custom indexed field set
    pub fn open_with_fields(
        snapshot: SnapshotStore,
        indexed_fields: HashSet<String>,
    ) -> EngineResult<Self> {
        let store = RecordStore::open(snapshot)?;
        let ids = IdAllocator::seeded(store.all());

        let mut engine = Self {
            store,
            fields: FieldIndex::new(indexed_fields),
            ranges: RangeIndex::new(),
            positions: HashMap::new(),
            ids,
        };
        engine.refresh();
        Ok(engine)
    }

    /// Rebuild every derived structure from the current store
    fn refresh(&mut self) {
        let records = self.store.all();
        self.fields.rebuild(records);
        self.ranges.rebuild(records);
        self.positions = records
            .iter()
            .enumerate()
            .filter_map(|(pos, r)| r.id().map(|id| (id, pos)))
            .collect();
    }

    /// Persist a staged collection, then make it live.
    ///
    /// Persist comes first: if the save fails, the in-memory store and the
    /// indexes still describe the pre-mutation state.
    fn commit(&mut self, staged: Vec<Transaction>) -> EngineResult<()> {
        self.store.snapshot().save(&staged)?;
        self.store.replace(staged);
        self.refresh();
        Ok(())
    }

    /// All live records, in store order
    pub fn all(&self) -> &[Transaction] {
        self.store.all()
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The indexed field set
    pub fn indexed_fields(&self) -> &HashSet<String> {
        self.fields.indexed_fields()
    }

    /// Point lookup by record id
    pub fn get(&self, id: RecordId) -> EngineResult<Transaction> {
        let pos = *self
            .positions
            .get(&id)
            .ok_or_else(|| EngineError::not_found(id))?;
        Ok(self.store.all()[pos].clone())
    }

    /// Apply a query as a conjunction and return matches in store order.
    ///
    /// Each filter resolves to a set of record ids via the matching index;
    /// the sets are intersected and resolved back to records at the end, so
    /// index entries never go stale against positions.
    pub fn list(&self, query: &ListQuery) -> Vec<Transaction> {
        if query.is_empty() {
            return self.store.all().to_vec();
        }

        let mut selected: Option<HashSet<RecordId>> = None;
        let mut narrow = |ids: Vec<RecordId>| {
            let ids: HashSet<RecordId> = ids.into_iter().collect();
            selected = Some(match selected.take() {
                Some(current) => current.intersection(&ids).copied().collect(),
                None => ids,
            });
        };

        for (field, value) in &query.filters {
            narrow(self.fields.lookup(field, value));
        }
        for range in &query.ranges {
            narrow(match range {
                RangeFilter::Amount { min, max } => self.ranges.amount_range(*min, *max),
                RangeFilter::Timestamp { min, max } => self
                    .ranges
                    .timestamp_range(min.as_deref(), max.as_deref()),
            });
        }

        let selected = selected.unwrap_or_default();
        if selected.is_empty() {
            return Vec::new();
        }

        self.store
            .all()
            .iter()
            .filter(|r| r.id().is_some_and(|id| selected.contains(&id)))
            .cloned()
            .collect()
    }

    /// Insert a new record.
    ///
    /// Mandatory fields must be present. An id is allocated when absent; an
    /// explicit id must be an unused unsigned integer, and the allocator's
    /// mark is raised past it so later allocations stay unique.
    pub fn insert(&mut self, fields: Map<String, Value>) -> EngineResult<Transaction> {
        let mut record = Transaction::from_fields(fields);

        if let Some(missing) = record.missing_mandatory_field() {
            return Err(EngineError::validation(format!(
                "missing mandatory field: {}",
                missing
            )));
        }

        if record.get("id").is_some() {
            let Some(id) = record.id() else {
                return Err(EngineError::validation("id must be an unsigned integer"));
            };
            if self.positions.contains_key(&id) {
                return Err(EngineError::validation(format!(
                    "id {} already exists",
                    id
                )));
            }
            self.ids.reserve(id);
        } else {
            let id = self.ids.next_id(self.store.all());
            IdAllocator::assign(&mut record, id);
        }

        let mut staged = self.store.all().to_vec();
        staged.push(record.clone());
        self.commit(staged)?;
        Ok(record)
    }

    /// Merge partial fields into an existing record.
    ///
    /// `id` is never overwritten by the merge.
    pub fn update(
        &mut self,
        id: RecordId,
        partial: &Map<String, Value>,
    ) -> EngineResult<Transaction> {
        let pos = *self
            .positions
            .get(&id)
            .ok_or_else(|| EngineError::not_found(id))?;

        let mut staged = self.store.all().to_vec();
        staged[pos].merge(partial);
        let updated = staged[pos].clone();

        self.commit(staged)?;
        Ok(updated)
    }

    /// Remove a record and return it.
    ///
    /// The id is terminal: the allocator will never hand it out again.
    pub fn delete(&mut self, id: RecordId) -> EngineResult<Transaction> {
        let pos = *self
            .positions
            .get(&id)
            .ok_or_else(|| EngineError::not_found(id))?;

        let mut staged = self.store.all().to_vec();
        let removed = staged.remove(pos);

        self.commit(staged)?;
        Ok(removed)
    }
}
