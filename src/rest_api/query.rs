//! # Query Parameter Parser
//!
//! Translates `/transactions` query strings into engine list queries.
//!
//! Reserved parameters carve out the range filters; every other parameter is
//! an exact-match filter passed through to the field index (which answers
//! empty, never an error, for fields it does not cover).

use std::collections::HashMap;

use crate::engine::{ListQuery, RangeFilter};

use super::errors::{ApiError, ApiResult};

/// Inclusive numeric lower bound on `amount`
const PARAM_MIN_AMOUNT: &str = "min_amount";
/// Inclusive numeric upper bound on `amount`
const PARAM_MAX_AMOUNT: &str = "max_amount";
/// Inclusive lower bound on `timestamp`
const PARAM_FROM: &str = "from";
/// Inclusive upper bound on `timestamp`
const PARAM_TO: &str = "to";

/// Parse query parameters into a list query
pub fn parse_list_query(params: &HashMap<String, String>) -> ApiResult<ListQuery> {
    let mut query = ListQuery::all();
    let mut amount: (Option<f64>, Option<f64>) = (None, None);
    let mut timestamp: (Option<String>, Option<String>) = (None, None);

    for (key, value) in params {
        match key.as_str() {
            PARAM_MIN_AMOUNT => amount.0 = Some(parse_amount(key, value)?),
            PARAM_MAX_AMOUNT => amount.1 = Some(parse_amount(key, value)?),
            PARAM_FROM => timestamp.0 = Some(value.clone()),
            PARAM_TO => timestamp.1 = Some(value.clone()),
            _ => {
                query.filters.insert(key.clone(), value.clone());
            }
        }
    }

    if amount.0.is_some() || amount.1.is_some() {
        query.ranges.push(RangeFilter::Amount {
            min: amount.0,
            max: amount.1,
        });
    }
    if timestamp.0.is_some() || timestamp.1.is_some() {
        query.ranges.push(RangeFilter::Timestamp {
            min: timestamp.0,
            max: timestamp.1,
        });
    }

    Ok(query)
}

fn parse_amount(key: &str, value: &str) -> ApiResult<f64> {
    value.parse().map_err(|_| {
        ApiError::InvalidQueryParam(format!("{} must be numeric, got '{}'", key, value))
    })
}
