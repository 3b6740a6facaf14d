//! Caller identification from request headers.

use std::net::IpAddr;

use axum::http::{header, HeaderMap};

use crate::config::{CLIENT_IP_HEADERS, CLI_USER_AGENTS, HEADER_X_FORWARDED_FOR};

/// Placeholder returned when the caller's address cannot be determined
pub const UNKNOWN_CLIENT: &str = "Unknown";

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// The caller's address.
///
/// Checks `CF-Connecting-IP`, then `X-Real-IP`, then the first entry of
/// `X-Forwarded-For`, then the socket peer address. Header values are
/// returned as sent, unvalidated.
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    if let Some(ip) = CLIENT_IP_HEADERS
        .iter()
        .find_map(|name| header_value(headers, name))
    {
        return ip.to_string();
    }
    if let Some(first) = header_value(headers, HEADER_X_FORWARDED_FOR)
        .and_then(|chain| chain.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return first.to_string();
    }
    peer.map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// True if the User-Agent names a command-line HTTP client (curl, wget, httpie).
pub fn is_cli_agent(headers: &HeaderMap) -> bool {
    let agent = match headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok()) {
        Some(agent) => agent.to_ascii_lowercase(),
        None => return false,
    };
    CLI_USER_AGENTS.iter().any(|tool| agent.contains(tool))
}
