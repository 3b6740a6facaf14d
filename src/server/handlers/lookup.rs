//! `/api/lookup` (JSON) and `/api/curl` (terminal card).

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
};

use super::{isolated, json_error, text_error};
use crate::error_handling::LookupError;
use crate::lookup::{AggregatedResult, IntelLookup};
use crate::report::render_card;
use crate::server::types::{AppState, LookupParams};

pub(super) async fn run_lookup(
    lookup: &Arc<IntelLookup>,
    query: String,
) -> Result<AggregatedResult, LookupError> {
    let lookup = Arc::clone(lookup);
    isolated(async move { lookup.lookup(&query).await }).await
}

fn required_query(params: LookupParams) -> Result<String, LookupError> {
    params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(LookupError::missing_query)
}

/// Full lookup as JSON.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Response {
    let query = match required_query(params) {
        Ok(query) => query,
        Err(e) => return json_error(&e),
    };
    match run_lookup(&state.lookup, query).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => json_error(&e),
    }
}

/// Full lookup rendered as a plain-text card.
pub async fn curl_handler(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Response {
    let query = match required_query(params) {
        Ok(query) => query,
        Err(e) => return text_error(&e),
    };
    match run_lookup(&state.lookup, query).await {
        Ok(result) => render_card(&result).into_response(),
        Err(e) => text_error(&e),
    }
}
