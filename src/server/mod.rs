//! HTTP surface.
//!
//! Provides the lookup endpoints:
//! - `/api/lookup?q=` - JSON lookup result
//! - `/api/curl?q=` - Plain-text terminal card
//! - `/api/asn?asn=` - Autonomous system detail
//! - `/api/myip` - The caller's address
//! - `/api/stats` - Upstream degradation counters
//! - `/` - Lookup of the caller's own address for curl, wget and httpie

mod client_ip;
mod handlers;
mod types;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;

pub use client_ip::{client_ip, is_cli_agent, UNKNOWN_CLIENT};
pub use handlers::{
    asn_handler, curl_handler, lookup_handler, myip_handler, root_handler, stats_handler,
};
pub use types::{AppState, AsnParams, ClientIpBody, ErrorBody, LookupParams};

/// Builds the router with every endpoint.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/lookup", get(lookup_handler))
        .route("/api/curl", get(curl_handler))
        .route("/api/asn", get(asn_handler))
        .route("/api/myip", get(myip_handler))
        .route("/api/stats", get(stats_handler))
        .with_state(state)
}

/// Binds `bind:port` and serves until the process exits.
pub async fn start_server(bind: &str, port: u16, state: AppState) -> Result<(), anyhow::Error> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}:{}: {}", bind, port, e))?;

    log::info!("Listening on http://{}:{}/", bind, port);
    log::info!("  - Lookup: http://{}:{}/api/lookup?q=8.8.8.8", bind, port);
    log::info!("  - Card:   http://{}:{}/api/curl?q=example.com", bind, port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests;
