//! Error type definitions.
//!
//! This module defines the request-level error taxonomy, initialization
//! errors, and the upstream degradation record used for telemetry.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{AsRefStr, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors that fail a lookup request as a whole.
///
/// Upstream soft failures never appear here; they degrade individual fields
/// of the result instead (see [`Degradation`]).
#[derive(Error, Debug)]
pub enum LookupError {
    /// The query is missing, or is neither an IP address nor a domain name.
    #[error("{0}")]
    Validation(String),

    /// The domain was valid but yielded neither an A nor an AAAA record.
    #[error("Could not resolve domain")]
    Resolution(String),

    /// A follow-up query (e.g. ASN detail) outside the core fan-out failed.
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    /// Anything unexpected. The detail is kept for logs and never displayed.
    #[error("Internal server error")]
    Internal(String),
}

impl LookupError {
    /// Validation error for a query that is neither an IP nor a domain.
    pub fn invalid_query() -> Self {
        LookupError::Validation("Invalid IP address or domain".to_string())
    }

    /// Validation error for a missing or blank query.
    pub fn missing_query() -> Self {
        LookupError::Validation("Query parameter \"q\" is required".to_string())
    }

    /// HTTP status code equivalent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            LookupError::Validation(_) | LookupError::Resolution(_) => 400,
            LookupError::Upstream(_) | LookupError::Internal(_) => 500,
        }
    }
}

/// The upstream sources consulted during a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, AsRefStr)]
pub enum UpstreamSource {
    /// DNS-over-HTTPS, one query per record type
    #[strum(serialize = "dns")]
    Dns,
    /// Geolocation / ASN provider
    #[strum(serialize = "geo")]
    Geo,
    /// Abuse reputation provider
    #[strum(serialize = "abuse")]
    Abuse,
}

/// Why an upstream call produced its degraded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, AsRefStr)]
pub enum FailureKind {
    /// The call exceeded its deadline
    Timeout,
    /// The upstream answered with a non-2xx status
    HttpStatus,
    /// Connection, TLS or request-building failure
    Transport,
    /// The body could not be decoded into the expected shape
    Decode,
    /// No credential configured (abuse source only); a normal outcome
    NoCredential,
}

/// A single upstream soft failure.
///
/// Clients return this instead of raising; the caller logs it, counts it and
/// substitutes the degraded value (empty sequence or absent record).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} {}: {}", .upstream.as_ref(), .kind.as_ref(), .detail)]
pub struct Degradation {
    pub upstream: UpstreamSource,
    pub kind: FailureKind,
    pub detail: String,
}

impl Degradation {
    pub fn new(upstream: UpstreamSource, kind: FailureKind, detail: impl Into<String>) -> Self {
        Degradation {
            upstream,
            kind,
            detail: detail.into(),
        }
    }

    pub fn timeout(upstream: UpstreamSource, deadline: Duration) -> Self {
        Degradation::new(
            upstream,
            FailureKind::Timeout,
            format!("no answer within {}ms", deadline.as_millis()),
        )
    }

    pub fn http_status(upstream: UpstreamSource, status: u16) -> Self {
        Degradation::new(upstream, FailureKind::HttpStatus, format!("HTTP {status}"))
    }

    pub fn no_credential(upstream: UpstreamSource) -> Self {
        Degradation::new(upstream, FailureKind::NoCredential, "no API key configured")
    }
}
