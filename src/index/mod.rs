//! Index subsystem for ledgerdb
//!
//! Indexes are derived, in-memory-only state rebuilt from the record store
//! after every mutation.
//!
//! # Design Principles
//!
//! - Derived state: indexes mirror the store, never the source of truth
//! - Entries reference persistent record ids, never array positions, so a
//!   delete cannot silently invalidate them
//! - Deterministic: lookups over the same store return identical sequences
//!
//! # Invariants
//!
//! - Absent and null fields are excluded from every index
//! - Range projections are sorted ascending with store order breaking ties
//! - Range lookups are inclusive on both bounds

mod field;
mod keys;
mod range;

pub use field::FieldIndex;
pub use keys::{canonical_text, AmountKey};
pub use range::RangeIndex;
