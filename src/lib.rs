//! ip_intel library: IP address and domain intelligence lookups
//!
//! This library classifies a query (IPv4, IPv6 or domain), resolves domains
//! over DNS-over-HTTPS, and gathers DNS records, geolocation and abuse
//! reputation for the address concurrently. Upstream failures degrade single
//! fields of the result instead of failing the lookup.
//!
//! # Example
//!
//! ```no_run
//! use ip_intel::{Config, IntelLookup};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let lookup = IntelLookup::from_config(&Config::from_env())?;
//!
//! let result = lookup.lookup("example.com").await?;
//! println!(
//!     "{} -> {} ({:?})",
//!     result.query,
//!     result.target_ip(),
//!     result.geo.as_ref().and_then(|g| g.city())
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod classify;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod history;
pub mod initialization;
pub mod intel;
pub mod lookup;
pub mod report;
pub mod reverse;
pub mod server;
mod utils;

// Re-export public API
pub use classify::{classify_query, ClassifiedQuery, QueryKind};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{InitializationError, LookupError};
pub use history::{History, HistoryItem};
pub use lookup::{AggregatedResult, IntelLookup};
pub use report::render_card;
