//! DNS resolution over HTTPS.
//!
//! This module queries a DNS-over-HTTPS JSON endpoint (Cloudflare by default):
//! - One GET per record type, all dispatched concurrently
//! - PTR via the reverse name for address queries, empty for domains
//! - Per-type soft failure: a failed type is empty, its siblings are unaffected

mod resolver;
mod types;

// Re-export public API
pub use resolver::{record_types_for, DohResolver};
pub use types::{DnsRecord, DnsRecordSet, RecordType, ADDRESS_RECORD_TYPES, ALL_RECORD_TYPES};
