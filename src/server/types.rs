//! Server state and request/response types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::lookup::IntelLookup;

/// Shared state for the HTTP surface.
///
/// Immutable apart from the degradation counters and the connection pool
/// inside the HTTP client; nothing else crosses requests.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<IntelLookup>,
}

impl AppState {
    pub fn new(lookup: IntelLookup) -> Self {
        AppState {
            lookup: Arc::new(lookup),
        }
    }
}

/// Query string of `/api/lookup` and `/api/curl`
#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub q: Option<String>,
}

/// Query string of `/api/asn`
#[derive(Debug, Default, Deserialize)]
pub struct AsnParams {
    pub asn: Option<String>,
}

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// JSON body of `/api/myip`
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientIpBody {
    pub ip: String,
}
