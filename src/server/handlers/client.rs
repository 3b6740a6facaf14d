//! Caller-address endpoints: `/api/myip` and `/` for command-line clients.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    response::{IntoResponse, Json, Response},
};

use super::lookup::run_lookup;
use super::{allow_any_origin, json_error};
use crate::server::client_ip::{client_ip, is_cli_agent};
use crate::server::types::{AppState, ClientIpBody};

const USAGE_BANNER: &str = "ip_intel: IP and domain intelligence lookup

  GET /api/lookup?q=<ip|domain>   JSON result
  GET /api/curl?q=<ip|domain>     plain-text card
  GET /api/asn?asn=<AS number>    autonomous system detail
  GET /api/myip                   your address
  curl /                          lookup of your own address
";

/// `{"ip": "<caller address>"}`
pub async fn myip_handler(
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    let ip = client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr.ip()));
    allow_any_origin(Json(ClientIpBody { ip }).into_response())
}

/// Looks up the caller's own address for curl, wget and httpie; prints a
/// usage banner for anything else.
pub async fn root_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    if !is_cli_agent(&headers) {
        return USAGE_BANNER.into_response();
    }

    let ip = client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr.ip()));
    log::debug!("Command-line client lookup for {}", ip);
    let response = match run_lookup(&state.lookup, ip).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => json_error(&e),
    };
    allow_any_origin(response)
}
