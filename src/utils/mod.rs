//! Utility functions.
//!
//! This module provides:
//! - The per-call deadline helper shared by the DNS resolver and intel clients
//! - Timing conversions

mod timing;

pub use timing::call_with_deadline;
