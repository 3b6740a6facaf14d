//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger (`env_logger` with plain or JSON formatting)
//! - HTTP client shared by every upstream client
//!
//! All initialization functions return `InitializationError` on failure.

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::{format_json_line, format_plain_line, init_logger_with};
