//! Range index
//!
//! Two sorted projections over the record sequence: (amount, id) in numeric
//! order and (timestamp, id) in lexicographic order. Range lookups locate
//! the bounds with binary search and take the contiguous slice, O(log n + k).

use crate::store::{RecordId, Transaction};

use super::keys::AmountKey;

/// Sorted projections enabling inclusive-bound range queries.
#[derive(Debug, Default)]
pub struct RangeIndex {
    /// (amount key, record id), ascending by amount, store order on ties
    by_amount: Vec<(AmountKey, RecordId)>,
    /// (timestamp, record id), ascending lexicographically, store order on ties
    by_timestamp: Vec<(String, RecordId)>,
}

impl RangeIndex {
    /// Creates an empty range index
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild both projections from the record sequence.
    ///
    /// Records missing the projected field (or carrying a non-scalar value
    /// for it) are excluded from that projection: a record without an amount
    /// can never satisfy an amount range filter. The sorts are stable, so
    /// equal keys keep their relative store order.
    pub fn rebuild(&mut self, records: &[Transaction]) {
        self.by_amount.clear();
        self.by_timestamp.clear();

        for record in records {
            let Some(id) = record.id() else {
                continue;
            };
            if let Some(amount) = record.amount() {
                self.by_amount.push((AmountKey::new(amount), id));
            }
            if let Some(ts) = record.timestamp() {
                self.by_timestamp.push((ts.to_string(), id));
            }
        }

        self.by_amount.sort_by(|a, b| a.0.cmp(&b.0));
        self.by_timestamp.sort_by(|a, b| a.0.cmp(&b.0));
    }

    /// Record ids with `min <= amount <= max`, ascending by amount.
    ///
    /// `None` bounds are unbounded on that side.
    pub fn amount_range(&self, min: Option<f64>, max: Option<f64>) -> Vec<RecordId> {
        let start = match min {
            Some(min) => {
                let key = AmountKey::new(min);
                self.by_amount.partition_point(|(k, _)| *k < key)
            }
            None => 0,
        };
        let end = match max {
            Some(max) => {
                let key = AmountKey::new(max);
                self.by_amount.partition_point(|(k, _)| *k <= key)
            }
            None => self.by_amount.len(),
        };

        self.by_amount[start..end].iter().map(|(_, id)| *id).collect()
    }

    /// Record ids with `min <= timestamp <= max` lexicographically, ascending.
    ///
    /// `None` bounds are unbounded on that side.
    pub fn timestamp_range(&self, min: Option<&str>, max: Option<&str>) -> Vec<RecordId> {
        let start = match min {
            Some(min) => self.by_timestamp.partition_point(|(k, _)| k.as_str() < min),
            None => 0,
        };
        let end = match max {
            Some(max) => self.by_timestamp.partition_point(|(k, _)| k.as_str() <= max),
            None => self.by_timestamp.len(),
        };

        self.by_timestamp[start..end]
            .iter()
            .map(|(_, id)| *id)
            .collect()
    }
}
