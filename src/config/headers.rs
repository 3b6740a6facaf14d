//! HTTP header name and value constants.
//!
//! Upstream request headers and the client-address headers consulted by the
//! HTTP surface.

// Upstream request headers
/// Media type requested from the DNS-over-HTTPS endpoint
pub const DNS_JSON_MEDIA_TYPE: &str = "application/dns-json";
/// Media type requested from the geolocation and abuse endpoints
pub const JSON_MEDIA_TYPE: &str = "application/json";
/// Header carrying the AbuseIPDB credential
pub const HEADER_ABUSEIPDB_KEY: &str = "Key";

// Client address headers, in order of preference
/// Set by Cloudflare to the connecting client address
pub const HEADER_CF_CONNECTING_IP: &str = "CF-Connecting-IP";
/// Set by most reverse proxies (nginx) to the client address
pub const HEADER_X_REAL_IP: &str = "X-Real-IP";
/// Comma-separated proxy chain; the first entry is the client
pub const HEADER_X_FORWARDED_FOR: &str = "X-Forwarded-For";

/// Client address headers consulted by the HTTP surface, most trusted first.
pub const CLIENT_IP_HEADERS: &[&str] = &[HEADER_CF_CONNECTING_IP, HEADER_X_REAL_IP];

/// User-Agent substrings identifying command-line HTTP clients
pub const CLI_USER_AGENTS: &[&str] = &["curl", "wget", "httpie"];
