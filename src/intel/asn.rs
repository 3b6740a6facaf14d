//! ASN detail lookups.
//!
//! Not part of the lookup fan-out: a failure here is an error for the caller
//! rather than a degraded field.

use serde_json::Value;

use super::geo::GeoClient;
use crate::config::JSON_MEDIA_TYPE;
use crate::error_handling::LookupError;

/// Extracts the digits of an ASN (`AS15169`, `as15169` and `15169` all give
/// `15169`). Returns `None` if there are none.
pub fn normalize_asn(asn: &str) -> Option<String> {
    let digits: String = asn.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

impl GeoClient {
    /// Fetches the provider's document for an autonomous system.
    ///
    /// # Errors
    ///
    /// `LookupError::Validation` if `asn` contains no digits;
    /// `LookupError::Upstream` on a non-2xx answer, transport failure, a
    /// body that is not JSON, or no complete answer within the client timeout.
    pub async fn fetch_asn(&self, asn: &str) -> Result<Value, LookupError> {
        let digits = normalize_asn(asn)
            .ok_or_else(|| LookupError::Validation("Invalid ASN format".to_string()))?;
        let query = format!("AS{digits}");

        match tokio::time::timeout(self.timeout, self.request_asn(&query)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "ASN lookup for {} timed out after {}ms",
                    query,
                    self.timeout.as_millis()
                );
                Err(LookupError::Upstream(format!(
                    "timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }

    /// Request and body read for `fetch_asn`, without a deadline.
    async fn request_asn(&self, query: &str) -> Result<Value, LookupError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .header(reqwest::header::ACCEPT, JSON_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| LookupError::Upstream(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("ASN lookup for {} failed with HTTP {}", query, status.as_u16());
            return Err(LookupError::Upstream(format!("HTTP {}", status.as_u16())));
        }

        response
            .json()
            .await
            .map_err(|e| LookupError::Upstream(e.without_url().to_string()))
    }
}
