//! Transaction record type
//!
//! A record is an open mapping from field name to JSON value. The fields the
//! index layer cares about are typed through accessors; everything else
//! passes through unchanged between the snapshot and the API surface.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Persistent record identifier, assigned once and never reused
pub type RecordId = u64;

/// Fields every transaction must carry on insert (`id` is assigned, not supplied)
pub const MANDATORY_FIELDS: [&str; 5] = [
    "transaction_type",
    "sender",
    "receiver",
    "amount",
    "timestamp",
];

/// One parsed mobile-money transaction.
///
/// Wraps the open field map so that snapshot round-trips preserve unknown
/// fields byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction {
    fields: Map<String, Value>,
}

impl Transaction {
    /// Create a record from an open field map
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the record identifier, if one has been assigned
    pub fn id(&self) -> Option<RecordId> {
        self.fields.get("id").and_then(Value::as_u64)
    }

    /// Set the record identifier.
    ///
    /// Only the allocator writes ids; see `engine::ids`.
    pub(crate) fn set_id(&mut self, id: RecordId) {
        self.fields.insert("id".to_string(), Value::from(id));
    }

    /// Returns a field value by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns whether the field key is present (a null value counts as present)
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the numeric amount, if present
    pub fn amount(&self) -> Option<f64> {
        self.fields.get("amount").and_then(Value::as_f64)
    }

    /// Returns the timestamp string, if present
    pub fn timestamp(&self) -> Option<&str> {
        self.fields.get("timestamp").and_then(Value::as_str)
    }

    /// Merge partial fields into this record.
    ///
    /// Last write wins per field. The `id` field is immutable once assigned
    /// and is never overwritten by a merge.
    pub fn merge(&mut self, partial: &Map<String, Value>) {
        for (key, value) in partial {
            if key == "id" {
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Returns the first mandatory field missing from this record, if any
    pub fn missing_mandatory_field(&self) -> Option<&'static str> {
        MANDATORY_FIELDS
            .iter()
            .find(|field| !self.fields.contains_key(**field))
            .copied()
    }

    /// Read-only view of the full field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for Transaction {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_fields(fields)
    }
}
