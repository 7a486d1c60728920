//! # REST API HTTP Server
//!
//! Axum-based HTTP server exposing the five engine operations.
//!
//! The engine sits behind a `tokio::sync::RwLock`: `list`/`get` handlers
//! take the read lock and may overlap; mutation handlers take the write lock
//! for the whole stage-persist-swap-rebuild cycle, so no reader ever
//! observes a partially rebuilt index.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::engine::Engine;
use crate::observability::Logger;
use crate::store::{RecordId, Transaction};

use super::auth::{authorize, Credentials};
use super::errors::{ApiError, ApiResult};
use super::query::parse_list_query;
use super::response::{ListResponse, SingleResponse};

/// Shared server state
pub struct ApiState {
    engine: RwLock<Engine>,
    credentials: Credentials,
}

impl ApiState {
    /// Create the shared state around an opened engine
    pub fn new(engine: Engine, credentials: Credentials) -> Self {
        Self {
            engine: RwLock::new(engine),
            credentials,
        }
    }
}

/// Build the Axum router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(insert_transaction),
        )
        .route(
            "/transactions/:id",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(
    engine: Engine,
    credentials: Credentials,
    bind: &str,
) -> std::io::Result<()> {
    let records = engine.len().to_string();
    let state = Arc::new(ApiState::new(engine, credentials));
    let listener = TcpListener::bind(bind).await?;

    Logger::info("server_started", &[("bind", bind), ("records", &records)]);
    axum::serve(listener, router(state)).await
}

fn parse_id(raw: &str) -> ApiResult<RecordId> {
    raw.parse()
        .map_err(|_| ApiError::InvalidQueryParam(format!("id must be an integer, got '{}'", raw)))
}

fn require_object(body: Value) -> ApiResult<Map<String, Value>> {
    match body {
        Value::Object(fields) => Ok(fields),
        _ => Err(ApiError::InvalidBody("expected a JSON object".to_string())),
    }
}

/// List records, filtered by query parameters
async fn list_transactions(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> ApiResult<Json<ListResponse<Transaction>>> {
    authorize(&headers, &state.credentials)?;
    let query = parse_list_query(&params)?;

    let engine = state.engine.read().await;
    Ok(Json(ListResponse::new(engine.list(&query))))
}

/// Point lookup by id
async fn get_transaction(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<SingleResponse<Transaction>>> {
    authorize(&headers, &state.credentials)?;
    let id = parse_id(&id)?;

    let engine = state.engine.read().await;
    Ok(Json(SingleResponse::new(engine.get(id)?)))
}

/// Insert a new record
async fn insert_transaction(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<SingleResponse<Transaction>>)> {
    authorize(&headers, &state.credentials)?;
    let fields = require_object(body)?;

    let mut engine = state.engine.write().await;
    let stored = engine.insert(fields)?;

    let id = stored.id().unwrap_or_default().to_string();
    Logger::info("transaction_inserted", &[("id", id.as_str())]);
    Ok((StatusCode::CREATED, Json(SingleResponse::new(stored))))
}

/// Merge partial fields into an existing record
async fn update_transaction(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult<Json<SingleResponse<Transaction>>> {
    authorize(&headers, &state.credentials)?;
    let id = parse_id(&id)?;
    let partial = require_object(body)?;

    let mut engine = state.engine.write().await;
    let updated = engine.update(id, &partial)?;

    let id = id.to_string();
    Logger::info("transaction_updated", &[("id", id.as_str())]);
    Ok(Json(SingleResponse::new(updated)))
}

/// Delete a record, returning it
async fn delete_transaction(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<SingleResponse<Transaction>>> {
    authorize(&headers, &state.credentials)?;
    let id = parse_id(&id)?;

    let mut engine = state.engine.write().await;
    let removed = engine.delete(id)?;

    let id = id.to_string();
    Logger::info("transaction_deleted", &[("id", id.as_str())]);
    Ok(Json(SingleResponse::new(removed)))
}
