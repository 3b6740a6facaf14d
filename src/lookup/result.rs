//! The aggregated lookup result.

use serde::{Deserialize, Serialize};

use crate::classify::QueryKind;
use crate::dns::{DnsRecordSet, RecordType};
use crate::intel::{AbuseRecord, GeoRecord};

/// Everything known about one query, built once per lookup.
///
/// Serialized with the field names of the JSON API (`type`, `queryType`,
/// `resolvedIP`). `type` is the family of the investigated address, so a
/// domain that resolved through AAAA reports `ipv6`. `geo` and `abuse` are
/// independently optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    /// Normalized query
    pub query: String,
    /// Address family of `target_ip()`
    #[serde(rename = "type")]
    pub kind: QueryKind,
    /// Classification of `query` itself
    pub query_kind: QueryKind,
    /// Address a domain resolved to (A preferred over AAAA); absent for IP queries
    #[serde(rename = "resolvedIP", default, skip_serializing_if = "Option::is_none")]
    pub resolved_ip: Option<String>,
    pub geo: Option<GeoRecord>,
    pub abuse: Option<AbuseRecord>,
    pub dns: DnsRecordSet,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl AggregatedResult {
    /// The address that was sent to the geolocation and abuse sources.
    pub fn target_ip(&self) -> &str {
        self.resolved_ip.as_deref().unwrap_or(&self.query)
    }

    /// First PTR answer without its trailing dot.
    pub fn hostname(&self) -> Option<&str> {
        self.dns
            .get(RecordType::PTR)
            .iter()
            .map(|r| r.data_without_root())
            .find(|h| !h.is_empty())
    }

    /// Abuse confidence score, if the abuse source answered.
    pub fn abuse_score(&self) -> Option<u32> {
        self.abuse.as_ref().map(|a| a.abuse_confidence_score)
    }

    /// Internet service provider, preferring the abuse source's answer.
    pub fn isp(&self) -> Option<&str> {
        self.abuse
            .as_ref()
            .and_then(|a| a.isp.as_deref())
            .filter(|isp| !isp.is_empty())
            .or_else(|| self.geo.as_ref()?.company_name())
    }
}
