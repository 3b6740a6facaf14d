//! HTTP handlers.

mod asn;
mod client;
mod lookup;
mod stats;

use std::future::Future;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};

use super::types::ErrorBody;
use crate::error_handling::LookupError;

pub use asn::asn_handler;
pub use client::{myip_handler, root_handler};
pub use lookup::{curl_handler, lookup_handler};
pub use stats::stats_handler;

/// Runs `work` on its own task so a panic inside it becomes
/// `LookupError::Internal` instead of a dropped connection.
pub(crate) async fn isolated<T, F>(work: F) -> Result<T, LookupError>
where
    F: Future<Output = Result<T, LookupError>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(work).await {
        Ok(result) => result,
        Err(join_error) => Err(LookupError::Internal(format!(
            "lookup task failed: {}",
            join_error
        ))),
    }
}

/// `Access-Control-Allow-Origin: *`
pub(crate) fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

pub(crate) fn status_for(err: &LookupError) -> StatusCode {
    StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// `{"error": "<message>"}` with the status code of `err`.
pub(crate) fn json_error(err: &LookupError) -> Response {
    if let LookupError::Internal(detail) = err {
        log::error!("Lookup failed: {}", detail);
    }
    (
        status_for(err),
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// `Error: <message>\n` as plain text with the status code of `err`.
pub(crate) fn text_error(err: &LookupError) -> Response {
    if let LookupError::Internal(detail) = err {
        log::error!("Lookup failed: {}", detail);
    }
    (status_for(err), format!("Error: {}\n", err)).into_response()
}
