//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including upstream endpoints, timeouts and thresholds.

use std::time::Duration;

// Upstream endpoints
/// DNS-over-HTTPS JSON endpoint (Cloudflare)
pub const DEFAULT_DNS_ENDPOINT: &str = "https://cloudflare-dns.com/dns-query";
/// IP geolocation / ASN endpoint (ipapi.is)
pub const DEFAULT_GEO_ENDPOINT: &str = "https://api.ipapi.is";
/// Abuse reputation endpoint (AbuseIPDB v2 check)
pub const DEFAULT_ABUSE_ENDPOINT: &str = "https://api.abuseipdb.com/api/v2/check";

/// Environment variable holding the AbuseIPDB API key.
/// When unset (or empty) the abuse source is skipped and reported as absent.
pub const ABUSEIPDB_API_KEY_ENV: &str = "ABUSEIPDB_API_KEY";

/// Lookback window in days for abuse reports
pub const ABUSE_MAX_AGE_DAYS: u32 = 90;

// Network operation timeouts
/// Per-record-type DNS query timeout in seconds
/// Most DoH answers arrive in well under a second; 3s fails fast on a stuck query
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Geolocation and abuse request timeout in seconds
/// Larger than DNS because the geolocation payload is a full WHOIS-like document
pub const UPSTREAM_TIMEOUT_SECS: u64 = 15;

/// Per-record-type DNS query timeout
pub const DNS_TIMEOUT: Duration = Duration::from_secs(DNS_TIMEOUT_SECS);
/// Geolocation and abuse request timeout
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(UPSTREAM_TIMEOUT_SECS);

/// Default User-Agent string for upstream requests.
pub const DEFAULT_USER_AGENT: &str = concat!("ip_intel/", env!("CARGO_PKG_VERSION"));

// History
/// Maximum number of entries kept in the lookup history
pub const MAX_HISTORY: usize = 20;
/// Default history file location (relative to the working directory)
pub const DEFAULT_HISTORY_PATH: &str = ".ip_intel_history.json";

// Threat levels (abuse confidence score, 0-100)
/// Scores strictly above this are reported as a high threat
pub const THREAT_HIGH_THRESHOLD: u8 = 75;
/// Scores strictly above this are reported as a medium threat
pub const THREAT_MEDIUM_THRESHOLD: u8 = 25;

// Server
/// Default port for `ip_intel serve`
pub const DEFAULT_SERVER_PORT: u16 = 8080;
/// Default bind address for `ip_intel serve`
pub const DEFAULT_SERVER_BIND: &str = "127.0.0.1";
