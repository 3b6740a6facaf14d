//! `/api/stats`: upstream degradation counters.

use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Map, Value};
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, UpstreamSource};
use crate::server::types::AppState;

/// JSON counters per upstream source and failure kind
pub async fn stats_handler(State(state): State<AppState>) -> Response {
    let stats = state.lookup.stats();
    let mut sources = Map::new();
    for source in UpstreamSource::iter() {
        let mut kinds = Map::new();
        for kind in FailureKind::iter() {
            kinds.insert(
                kind.as_ref().to_string(),
                Value::from(stats.get_count(source, kind)),
            );
        }
        kinds.insert("total".to_string(), Value::from(stats.total_for(source)));
        sources.insert(source.as_ref().to_string(), Value::Object(kinds));
    }

    Json(json!({
        "total": stats.total(),
        "degradations": sources,
    }))
    .into_response()
}
