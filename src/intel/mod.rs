//! IP intelligence clients.
//!
//! This module talks to the two per-address intelligence providers:
//! - Geolocation / ASN (`GeoClient`, ipapi.is)
//! - Abuse reputation (`AbuseClient`, AbuseIPDB)
//!
//! Both return `None` instead of failing; the reason is logged and counted
//! through `call_with_deadline`. ASN detail lookups reuse the geolocation
//! client but do report errors, since they are a separate request.

mod abuse;
mod asn;
mod geo;

// Re-export public API
pub use abuse::{AbuseClient, AbuseRecord};
pub use asn::normalize_asn;
pub use geo::{AbuseContact, GeoAsn, GeoClient, GeoCompany, GeoDatacenter, GeoLocation, GeoRecord};
