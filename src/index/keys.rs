//! Index key forms
//!
//! Two key forms cover the two index families: a canonical string form for
//! exact-match buckets (the query layer only ever supplies string-typed
//! filter values) and a total-order numeric key for the amount projection.

use serde_json::Value;

/// Canonical string form of a field value for exact-match buckets.
///
/// Scalars compare by their canonical text: `100` matches the filter value
/// `"100"`, `true` matches `"true"`. Null yields `None`; absent and null
/// fields stay out of the index entirely, and "field missing" stays
/// distinguishable from "field equals empty string". Arrays and objects are
/// not indexable.
pub fn canonical_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Total-order key for amounts.
///
/// Stores the f64 bit pattern remapped so that unsigned comparison matches
/// numeric order, negatives included. NaN amounts sort above everything and
/// in practice never occur (JSON has no NaN literal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AmountKey(u64);

impl AmountKey {
    /// Create a key from a numeric amount
    pub fn new(v: f64) -> Self {
        let bits = v.to_bits();
        let ordered = if (bits >> 63) == 1 {
            !bits // Negative: flip all bits
        } else {
            bits ^ (1 << 63) // Positive: flip sign bit
        };
        AmountKey(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_text_scalars() {
        assert_eq!(canonical_text(&json!("Alice")), Some("Alice".to_string()));
        assert_eq!(canonical_text(&json!(100)), Some("100".to_string()));
        assert_eq!(canonical_text(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(canonical_text(&json!(true)), Some("true".to_string()));
    }

    #[test]
    fn test_canonical_text_excludes_null_and_composites() {
        assert_eq!(canonical_text(&json!(null)), None);
        assert_eq!(canonical_text(&json!([1, 2])), None);
        assert_eq!(canonical_text(&json!({"a": 1})), None);
    }

    #[test]
    fn test_amount_key_orders_numerically() {
        let values = [-1000.5, -1.0, 0.0, 0.5, 1.0, 100.0, 1e9];
        for pair in values.windows(2) {
            assert!(
                AmountKey::new(pair[0]) < AmountKey::new(pair[1]),
                "{} should sort below {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_amount_key_equality() {
        assert_eq!(AmountKey::new(100.0), AmountKey::new(100.0));
        // Integer-typed and float-typed JSON amounts land on the same key.
        assert_eq!(
            AmountKey::new(json!(100).as_f64().unwrap()),
            AmountKey::new(json!(100.0).as_f64().unwrap())
        );
    }
}
