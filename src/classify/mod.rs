//! Query classification.
//!
//! Decides whether a query string is an IPv4 address, an IPv6 address, or a
//! domain name. Classification is pure: no I/O, no logging side effects that
//! matter, and every input yields exactly one kind or a rejection.
//!
//! Key functions:
//! - `normalize_query()` - Trims and lower-cases raw input
//! - `classify()` - Classifies an already-normalized query
//! - `classify_query()` - Both, producing a `ClassifiedQuery`

use std::net::Ipv6Addr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::error_handling::LookupError;

/// Four dot-separated groups of one to three digits; range is checked separately
const IPV4_SHAPE_PATTERN: &str = r"^(\d{1,3}\.){3}\d{1,3}$";

/// Dot-separated alphanumeric labels, hyphens allowed inside a label (runs
/// included, for punycode `xn--` labels), alphabetic TLD of 2+ chars
const DOMAIN_PATTERN: &str = r"^([a-z0-9]+(-+[a-z0-9]+)*\.)+[a-z]{2,}$";

/// Helper function to safely compile a regex pattern, panicking with a detailed error message
/// if compilation fails. Used for static regex patterns that are compile-time constants.
fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static IPV4_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(IPV4_SHAPE_PATTERN, "IPV4_SHAPE_RE"));
static DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(DOMAIN_PATTERN, "DOMAIN_RE"));

/// What a query string denotes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QueryKind {
    /// Dotted-quad IPv4 literal
    Ipv4,
    /// IPv6 literal in any standard textual form
    Ipv6,
    /// Domain name
    Domain,
}

impl QueryKind {
    /// True for the two address kinds.
    pub fn is_ip(self) -> bool {
        matches!(self, QueryKind::Ipv4 | QueryKind::Ipv6)
    }
}

/// A normalized query together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedQuery {
    query: String,
    kind: QueryKind,
}

impl ClassifiedQuery {
    /// The normalized (trimmed, lower-cased) query.
    pub fn as_str(&self) -> &str {
        &self.query
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }
}

/// Trims surrounding whitespace and lower-cases the query.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Returns true if `input` is a dotted-quad IPv4 address with every octet in 0-255.
///
/// Leading zeros are tolerated (`010.0.0.1`); out-of-range octets such as
/// `999.1.1.1` are rejected even though they match the shape.
pub fn is_ipv4(input: &str) -> bool {
    IPV4_SHAPE_RE.is_match(input)
        && input
            .split('.')
            .all(|octet| octet.parse::<u16>().map(|v| v <= 255).unwrap_or(false))
}

/// Returns true if `input` is an IPv6 address.
///
/// Accepts full, `::`-compressed, loopback, unspecified and IPv4-mapped /
/// IPv4-embedded forms. Zone identifiers (`fe80::1%eth0`) are rejected.
pub fn is_ipv6(input: &str) -> bool {
    input.contains(':') && input.parse::<Ipv6Addr>().is_ok()
}

/// Returns true if `input` looks like a lower-case domain name.
pub fn is_domain(input: &str) -> bool {
    DOMAIN_RE.is_match(input)
}

/// Classifies an already-normalized query.
///
/// # Errors
///
/// Returns `LookupError::Validation` if the input is neither an IP address
/// nor a domain name.
pub fn classify(input: &str) -> Result<QueryKind, LookupError> {
    if is_ipv4(input) {
        Ok(QueryKind::Ipv4)
    } else if is_ipv6(input) {
        Ok(QueryKind::Ipv6)
    } else if is_domain(input) {
        Ok(QueryKind::Domain)
    } else {
        Err(LookupError::invalid_query())
    }
}

/// Normalizes and classifies raw user input.
///
/// # Errors
///
/// Returns `LookupError::Validation` if the input is blank or cannot be
/// classified.
pub fn classify_query(raw: &str) -> Result<ClassifiedQuery, LookupError> {
    let query = normalize_query(raw);
    if query.is_empty() {
        return Err(LookupError::missing_query());
    }
    let kind = classify(&query)?;
    Ok(ClassifiedQuery { query, kind })
}
