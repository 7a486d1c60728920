//! # REST API
//!
//! The HTTP surface over the engine: five routes, one per coordinator
//! operation. The engine sits behind an `RwLock` so queries run concurrently
//! while mutations hold the write lock for their full
//! stage-persist-swap-rebuild cycle.

mod auth;
mod errors;
mod query;
mod response;
mod server;

pub use auth::Credentials;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use query::parse_list_query;
pub use response::{ListResponse, SingleResponse};
pub use server::{router, serve, ApiState};
