//! SMS ingest pipeline for ledgerdb
//!
//! Turns raw mobile-money SMS dumps into transaction records: classify the
//! body into a transaction kind, extract amount and counterparties, convert
//! the human-readable date to a sortable ISO-8601 timestamp.
//!
//! The pipeline is lossy on purpose: OTPs, promotions, and bodies with no
//! extractable amount are dropped, not recorded as empty transactions.

mod classify;
mod extract;
mod transform;

pub use classify::{detect_kind, TransactionKind};
pub use extract::{extract_amount, extract_parties, parse_timestamp};
pub use transform::{transform_sms, RawSms};
