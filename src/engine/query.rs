//! List query types
//!
//! A query is a conjunction: every exact-match filter and every range filter
//! must hold. The empty query matches everything.

use std::collections::BTreeMap;

/// One range filter over a range-indexed field.
///
/// Bounds are inclusive; `None` leaves that side unbounded.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeFilter {
    /// Numeric amount range
    Amount {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Lexicographic timestamp range
    Timestamp {
        min: Option<String>,
        max: Option<String>,
    },
}

/// A conjunction of exact-match and range filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// field -> required canonical value
    pub filters: BTreeMap<String, String>,
    /// range constraints, one per range-indexed field
    pub ranges: Vec<RangeFilter>,
}

impl ListQuery {
    /// The query that matches every record
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns whether this query has no constraints
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.ranges.is_empty()
    }

    /// Add an exact-match filter
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Add a range filter
    pub fn with_range(mut self, range: RangeFilter) -> Self {
        self.ranges.push(range);
        self
    }
}
