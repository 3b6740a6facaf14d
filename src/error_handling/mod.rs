//! Error handling and degradation statistics.
//!
//! This module provides:
//! - The request-level error taxonomy (`LookupError`)
//! - Initialization errors
//! - Upstream degradation records and their categorization
//! - Thread-safe degradation counters
//!
//! Only validation and domain-resolution failures stop a lookup. Everything
//! that goes wrong while talking to an upstream during fan-out is a
//! **degradation**: logged, counted, and replaced by an empty or absent value.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, degradation_from_reqwest};
pub use stats::DegradationStats;
pub use types::{Degradation, FailureKind, InitializationError, LookupError, UpstreamSource};
