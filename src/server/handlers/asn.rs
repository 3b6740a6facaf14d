//! `/api/asn`: relays the provider's autonomous-system document.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
};

use super::{allow_any_origin, isolated, json_error};
use crate::error_handling::LookupError;
use crate::server::types::{AppState, AsnParams};

pub async fn asn_handler(
    State(state): State<AppState>,
    Query(params): Query<AsnParams>,
) -> Response {
    let response = match params.asn.filter(|a| !a.is_empty()) {
        Some(asn) => {
            let lookup = Arc::clone(&state.lookup);
            match isolated(async move { lookup.geo().fetch_asn(&asn).await }).await {
                Ok(document) => Json(document).into_response(),
                Err(e) => json_error(&e),
            }
        }
        None => json_error(&LookupError::Validation(
            "asn parameter is required".to_string(),
        )),
    };
    allow_any_origin(response)
}
