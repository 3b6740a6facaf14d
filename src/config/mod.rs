//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, endpoints, limits)
//! - HTTP header name constants
//! - The library `Config` and its CLI-facing option enums
//! - The clap command-line definition (`Cli`)

mod cli;
mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use cli::{Cli, Command, GlobalArgs};
pub use headers::*;
pub use types::{Config, LogFormat, LogLevel, OutputFormat};
