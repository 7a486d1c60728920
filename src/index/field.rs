//! Exact-match field index
//!
//! One bucket map per indexed field: canonical field value -> record ids
//! holding that value. Rebuilt in full (O(n)) after every mutation.

use std::collections::{HashMap, HashSet};

use crate::store::{RecordId, Transaction};

use super::keys::canonical_text;

/// Exact-match index over a configurable set of fields.
pub struct FieldIndex {
    /// Indexed field names
    indexed_fields: HashSet<String>,
    /// field -> canonical value -> record ids, in store order
    buckets: HashMap<String, HashMap<String, Vec<RecordId>>>,
}

impl FieldIndex {
    /// Creates an empty index over the given field set
    pub fn new(indexed_fields: HashSet<String>) -> Self {
        let mut buckets = HashMap::new();
        for field in &indexed_fields {
            buckets.insert(field.clone(), HashMap::new());
        }

        Self {
            indexed_fields,
            buckets,
        }
    }

    /// The field set the original system indexes
    pub fn default_fields() -> HashSet<String> {
        ["transaction_type", "sender", "receiver"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Rebuild all buckets from the record sequence.
    ///
    /// Records without an assigned id are skipped; absent and null field
    /// values are excluded rather than indexed under a sentinel key.
    pub fn rebuild(&mut self, records: &[Transaction]) {
        for bucket in self.buckets.values_mut() {
            bucket.clear();
        }

        for record in records {
            let Some(id) = record.id() else {
                continue;
            };

            for field in &self.indexed_fields {
                let Some(text) = record.get(field).and_then(canonical_text) else {
                    continue;
                };
                if let Some(bucket) = self.buckets.get_mut(field) {
                    bucket.entry(text).or_default().push(id);
                }
            }
        }
    }

    /// All record ids whose `field` equals `value`, in store order.
    ///
    /// Unindexed fields and absent values return empty, never an error.
    pub fn lookup(&self, field: &str, value: &str) -> Vec<RecordId> {
        self.buckets
            .get(field)
            .and_then(|bucket| bucket.get(value))
            .cloned()
            .unwrap_or_default()
    }

    /// Returns whether `field` is in the indexed set
    pub fn is_indexed(&self, field: &str) -> bool {
        self.indexed_fields.contains(field)
    }

    /// The indexed field set
    pub fn indexed_fields(&self) -> &HashSet<String> {
        &self.indexed_fields
    }
}
