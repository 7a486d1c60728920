//! Index coordinator for ledgerdb
//!
//! The engine is the façade the request layer talks to. It ties the record
//! store and both index families together and enforces the one ordering rule
//! that keeps them honest: every store mutation is persisted, swapped in, and
//! followed by an index refresh before any query is answered.
//!
//! # Invariants
//!
//! - Queries are answered from index lookups, never a linear scan over an
//!   indexed field
//! - A failed mutation leaves the store and all indexes in their
//!   pre-operation state
//! - Record ids are unique and never reissued within a process lifetime

mod coordinator;
mod errors;
mod ids;
mod query;

pub use coordinator::Engine;
pub use errors::{EngineError, EngineResult};
pub use ids::IdAllocator;
pub use query::{ListQuery, RangeFilter};
