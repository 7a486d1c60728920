//! Record identifier allocation
//!
//! Ids are unsigned integers, unique across the live store and never reused
//! within a process lifetime. `max(live ids) + 1` alone would reissue an id
//! after deleting the record holding the maximum, so the allocator carries a
//! high-water mark: it never hands out anything below what it has already
//! issued, no matter what has since been deleted.

use crate::store::{RecordId, Transaction};

/// Monotonic record id allocator.
#[derive(Debug, Default)]
pub struct IdAllocator {
    /// Lowest id this allocator is still willing to issue
    floor: RecordId,
}

impl IdAllocator {
    /// Creates an allocator with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator seeded from an existing collection, so restarts
    /// continue above every persisted id
    pub fn seeded(records: &[Transaction]) -> Self {
        Self {
            floor: Self::derived_next(records),
        }
    }

    /// `1 + max(existing ids)`, or `0` for an empty collection
    fn derived_next(records: &[Transaction]) -> RecordId {
        records
            .iter()
            .filter_map(Transaction::id)
            .max()
            .map(|max| max + 1)
            .unwrap_or(0)
    }

    /// Returns the next free id and advances the high-water mark.
    ///
    /// The scan keeps the contract `1 + max(existing ids)`; the mark ensures
    /// a previously issued id is never handed out again, even after the
    /// record holding the maximum is deleted.
    pub fn next_id(&mut self, records: &[Transaction]) -> RecordId {
        let id = Self::derived_next(records).max(self.floor);
        self.floor = id + 1;
        id
    }

    /// Raise the high-water mark past an id issued outside the allocator
    /// (a caller-supplied explicit id)
    pub fn reserve(&mut self, id: RecordId) {
        self.floor = self.floor.max(id + 1);
    }

    /// Set the record's id only if it has none.
    ///
    /// Never overwrites, which makes assignment idempotent under retry.
    pub fn assign(record: &mut Transaction, id: RecordId) {
        if record.get("id").is_none() {
            record.set_id(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<Transaction> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_collection_starts_at_zero() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.next_id(&[]), 0);
        assert_eq!(alloc.next_id(&[]), 1);
    }

    #[test]
    fn test_next_is_max_plus_one() {
        let mut alloc = IdAllocator::new();
        let recs = records(json!([{"id": 0}, {"id": 4}, {"id": 2}]));
        assert_eq!(alloc.next_id(&recs), 5);
    }

    #[test]
    fn test_no_reissue_after_deleting_max() {
        let mut alloc = IdAllocator::new();

        let recs = records(json!([{"id": 0}, {"id": 1}]));
        assert_eq!(alloc.next_id(&recs), 2);

        // Record 2 was inserted then deleted along with 1; the scan alone
        // would say 1 again.
        let after_delete = records(json!([{"id": 0}]));
        assert_eq!(alloc.next_id(&after_delete), 3);
    }

    #[test]
    fn test_seeded_continues_above_persisted_ids() {
        let recs = records(json!([{"id": 6}]));
        let mut alloc = IdAllocator::seeded(&recs);
        assert_eq!(alloc.next_id(&[]), 7);
    }

    #[test]
    fn test_reserve_raises_floor() {
        let mut alloc = IdAllocator::new();
        alloc.reserve(10);
        assert_eq!(alloc.next_id(&[]), 11);

        // Reserving below the mark changes nothing.
        alloc.reserve(3);
        assert_eq!(alloc.next_id(&[]), 12);
    }

    #[test]
    fn test_assign_is_idempotent() {
        let mut tx: Transaction = serde_json::from_value(json!({"sender": "A"})).unwrap();

        IdAllocator::assign(&mut tx, 5);
        assert_eq!(tx.id(), Some(5));

        // A second assignment with a different candidate never changes it.
        IdAllocator::assign(&mut tx, 9);
        assert_eq!(tx.id(), Some(5));
    }
}
