//! Configuration types and CLI option enums.
//!
//! This module defines the library `Config` along with the enums used for
//! command-line argument parsing.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    ABUSEIPDB_API_KEY_ENV, ABUSE_MAX_AGE_DAYS, DEFAULT_ABUSE_ENDPOINT, DEFAULT_DNS_ENDPOINT,
    DEFAULT_GEO_ENDPOINT, DEFAULT_USER_AGENT, DNS_TIMEOUT, UPSTREAM_TIMEOUT,
};

/// Verbosity of this crate's log output (`--log-level`).
///
/// HTTP stack modules are capped separately; see `initialization::init_logger_with`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    /// Every upstream call with its latency
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        use log::LevelFilter as F;
        match level {
            LogLevel::Error => F::Error,
            LogLevel::Warn => F::Warn,
            LogLevel::Info => F::Info,
            LogLevel::Debug => F::Debug,
            LogLevel::Trace => F::Trace,
        }
    }
}

/// Log line format (`--log-format`): coloured text or one JSON object per line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Output format for `ip_intel lookup`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON result (default)
    Json,
    /// Box-drawn terminal card
    Text,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use ip_intel::Config;
///
/// let config = Config {
///     abuse_api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// DNS-over-HTTPS JSON endpoint
    pub dns_endpoint: String,

    /// Geolocation / ASN endpoint
    pub geo_endpoint: String,

    /// Abuse reputation endpoint
    pub abuse_endpoint: String,

    /// Abuse reputation API key; `None` disables the abuse source
    pub abuse_api_key: Option<String>,

    /// Lookback window for abuse reports, in days
    pub abuse_max_age_days: u32,

    /// Timeout applied to each DNS record-type query
    pub dns_timeout: Duration,

    /// Timeout applied to the geolocation and abuse requests
    pub upstream_timeout: Duration,

    /// HTTP User-Agent header value for upstream requests
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            log_format: LogFormat::default(),
            dns_endpoint: DEFAULT_DNS_ENDPOINT.to_string(),
            geo_endpoint: DEFAULT_GEO_ENDPOINT.to_string(),
            abuse_endpoint: DEFAULT_ABUSE_ENDPOINT.to_string(),
            abuse_api_key: None,
            abuse_max_age_days: ABUSE_MAX_AGE_DAYS,
            dns_timeout: DNS_TIMEOUT,
            upstream_timeout: UPSTREAM_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Builds the default configuration with the abuse API key taken from
    /// `ABUSEIPDB_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            abuse_api_key: non_empty(std::env::var(ABUSEIPDB_API_KEY_ENV).ok()),
            ..Default::default()
        }
    }
}

/// Treats an empty or whitespace-only credential as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_values_map_to_filters() {
        let cases = [
            ("error", log::LevelFilter::Error),
            ("warn", log::LevelFilter::Warn),
            ("info", log::LevelFilter::Info),
            ("debug", log::LevelFilter::Debug),
            ("trace", log::LevelFilter::Trace),
        ];
        for (value, expected) in cases {
            let level = LogLevel::from_str(value, false).unwrap();
            assert_eq!(log::LevelFilter::from(level), expected, "{}", value);
        }
        assert!(LogLevel::from_str("verbose", false).is_err());
        assert_eq!(LogFormat::from_str("json", false), Ok(LogFormat::Json));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.dns_endpoint, DEFAULT_DNS_ENDPOINT);
        assert_eq!(config.geo_endpoint, DEFAULT_GEO_ENDPOINT);
        assert_eq!(config.abuse_endpoint, DEFAULT_ABUSE_ENDPOINT);
        assert_eq!(config.abuse_max_age_days, 90);
        assert_eq!(config.dns_timeout, Duration::from_secs(3));
        assert_eq!(config.upstream_timeout, Duration::from_secs(15));
        assert!(config.abuse_api_key.is_none());
        assert!(config.user_agent.starts_with("ip_intel/"));
    }

    #[test]
    fn test_dns_timeout_shorter_than_upstream() {
        let config = Config::default();
        assert!(config.dns_timeout < config.upstream_timeout);
    }

    #[test]
    fn test_non_empty_credential() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(Some(" abc ".to_string())), Some("abc".to_string()));
    }

    #[test]
    fn test_default_logging_is_plain_info() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_format, LogFormat::Plain);
        assert_eq!(OutputFormat::from_str("text", false), Ok(OutputFormat::Text));
    }
}
