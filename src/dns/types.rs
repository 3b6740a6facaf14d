//! DNS record data structures.
//!
//! `RecordType` is the fixed set of twelve record types a lookup may query.
//! `DnsRecord` mirrors one entry of a DNS-over-HTTPS JSON `Answer` array and
//! `DnsRecordSet` maps each queried type to its answers in upstream order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The record types a lookup can query, as sent in the DoH `type` parameter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[allow(clippy::upper_case_acronyms)] // Record type mnemonics are conventionally upper case
pub enum RecordType {
    A,
    AAAA,
    MX,
    TXT,
    NS,
    CNAME,
    SOA,
    PTR,
    CAA,
    SRV,
    DS,
    DNSKEY,
}

/// All twelve supported record types, in query order.
pub const ALL_RECORD_TYPES: [RecordType; 12] = [
    RecordType::A,
    RecordType::AAAA,
    RecordType::MX,
    RecordType::TXT,
    RecordType::NS,
    RecordType::CNAME,
    RecordType::SOA,
    RecordType::PTR,
    RecordType::CAA,
    RecordType::SRV,
    RecordType::DS,
    RecordType::DNSKEY,
];

/// Types needed to turn a domain into an address.
pub const ADDRESS_RECORD_TYPES: [RecordType; 2] = [RecordType::A, RecordType::AAAA];

/// One DoH answer entry.
///
/// Unknown or type-specific fields are kept in `extra` and serialized back
/// out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Owner name, usually with a trailing dot
    #[serde(default)]
    pub name: String,
    /// Numeric RR type from the answer (1 = A, 28 = AAAA, ...)
    #[serde(rename = "type", default)]
    pub rr_type: u16,
    #[serde(rename = "TTL", default)]
    pub ttl: u32,
    /// Presentation-format record data
    #[serde(default)]
    pub data: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DnsRecord {
    /// Builds a record with no extra fields.
    pub fn new(name: impl Into<String>, rr_type: u16, ttl: u32, data: impl Into<String>) -> Self {
        DnsRecord {
            name: name.into(),
            rr_type,
            ttl,
            data: data.into(),
            extra: Map::new(),
        }
    }

    /// MX preference, taken from the first token of `data` (`"10 mx.example.com."`).
    pub fn priority(&self) -> Option<u16> {
        self.data.split_whitespace().next()?.parse().ok()
    }

    /// `data` with a trailing root dot removed (`"dns.google."` -> `"dns.google"`).
    pub fn data_without_root(&self) -> &str {
        self.data.strip_suffix('.').unwrap_or(&self.data)
    }
}

/// Record type -> answers, in upstream response order.
///
/// A type that was never inserted reads as an empty sequence, so "absent" and
/// "queried but empty" are indistinguishable to callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DnsRecordSet(BTreeMap<RecordType, Vec<DnsRecord>>);

impl DnsRecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers for `record_type`; empty if the type is absent.
    pub fn get(&self, record_type: RecordType) -> &[DnsRecord] {
        self.0
            .get(&record_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Sets the answers for `record_type`, replacing any previous entry.
    pub fn insert(&mut self, record_type: RecordType, records: Vec<DnsRecord>) {
        self.0.insert(record_type, records);
    }

    /// Whether `record_type` has an entry (possibly empty).
    pub fn contains(&self, record_type: RecordType) -> bool {
        self.0.contains_key(&record_type)
    }

    /// Moves every entry of `other` into this set.
    pub fn merge(&mut self, other: DnsRecordSet) {
        self.0.extend(other.0);
    }

    /// `data` of the first non-empty answer for `record_type`.
    pub fn first_data(&self, record_type: RecordType) -> Option<&str> {
        self.get(record_type)
            .iter()
            .map(|r| r.data.as_str())
            .find(|d| !d.is_empty())
    }

    /// Record types present in the set.
    pub fn record_types(&self) -> impl Iterator<Item = RecordType> + '_ {
        self.0.keys().copied()
    }

    /// Number of record types present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no record type has any answer.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordType, &Vec<DnsRecord>)> {
        self.0.iter()
    }
}

/// Top-level DoH JSON response. Only `Answer` matters; it is absent for
/// NXDOMAIN and NODATA responses.
#[derive(Debug, Deserialize)]
pub(crate) struct DohResponse {
    #[serde(rename = "Status", default)]
    pub status: u32,
    #[serde(rename = "Answer", default)]
    pub answer: Vec<DnsRecord>,
}
