//! Command-line interface definition.
//!
//! Parsed by the binary and mapped onto the library `Config`; programmatic
//! users build `Config` directly.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    ABUSEIPDB_API_KEY_ENV, DEFAULT_ABUSE_ENDPOINT, DEFAULT_DNS_ENDPOINT, DEFAULT_GEO_ENDPOINT,
    DEFAULT_HISTORY_PATH, DEFAULT_SERVER_BIND, DEFAULT_SERVER_PORT,
};
use crate::config::types::{non_empty, Config, LogFormat, LogLevel, OutputFormat};

/// IP address and domain intelligence lookup
#[derive(Debug, Parser)]
#[command(name = "ip_intel", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value = "info", global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value = "plain", global = true)]
    pub log_format: LogFormat,

    /// DNS-over-HTTPS JSON endpoint
    #[arg(long, default_value = DEFAULT_DNS_ENDPOINT, global = true)]
    pub dns_endpoint: String,

    /// Geolocation / ASN endpoint
    #[arg(long, default_value = DEFAULT_GEO_ENDPOINT, global = true)]
    pub geo_endpoint: String,

    /// Abuse reputation endpoint
    #[arg(long, default_value = DEFAULT_ABUSE_ENDPOINT, global = true)]
    pub abuse_endpoint: String,

    /// Abuse reputation API key (omit to skip the abuse source)
    #[arg(long, env = ABUSEIPDB_API_KEY_ENV, hide_env_values = true, global = true)]
    pub abuse_api_key: Option<String>,

    /// History file used by `lookup` and `history`
    #[arg(long, default_value = DEFAULT_HISTORY_PATH, global = true)]
    pub history_file: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up an IP address or domain
    Lookup {
        /// IPv4 address, IPv6 address or domain name
        query: String,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Do not record the lookup in the history file
        #[arg(long)]
        no_history: bool,
    },

    /// Show details for an autonomous system (AS15169 or 15169)
    Asn {
        asn: String,
    },

    /// Show recent lookups, newest first
    History {
        /// Delete all history entries
        #[arg(long)]
        clear: bool,
    },

    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value_t = DEFAULT_SERVER_PORT)]
        port: u16,

        #[arg(long, default_value = DEFAULT_SERVER_BIND)]
        bind: String,
    },
}

impl GlobalArgs {
    /// Library configuration for these options.
    pub fn to_config(&self) -> Config {
        Config {
            log_level: self.log_level,
            log_format: self.log_format,
            dns_endpoint: self.dns_endpoint.clone(),
            geo_endpoint: self.geo_endpoint.clone(),
            abuse_endpoint: self.abuse_endpoint.clone(),
            abuse_api_key: non_empty(self.abuse_api_key.clone()),
            ..Default::default()
        }
    }
}
