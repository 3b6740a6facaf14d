//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client shared by the DNS, geolocation and abuse clients.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Rustls TLS backend (no native TLS)
///
/// No client-wide timeout is set: each upstream call carries its own deadline
/// (3s per DNS query, 15s for geolocation and abuse).
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
