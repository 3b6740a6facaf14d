//! DNS-over-HTTPS resolution.
//!
//! Each record type is a separate GET against the DoH JSON endpoint, run
//! concurrently with its own deadline. A failed, slow or malformed answer
//! empties that type only; `resolve()` itself never fails.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use super::types::{DnsRecord, DnsRecordSet, DohResponse, RecordType, ALL_RECORD_TYPES};
use crate::classify::QueryKind;
use crate::config::DNS_JSON_MEDIA_TYPE;
use crate::error_handling::{
    degradation_from_reqwest, Degradation, DegradationStats, UpstreamSource,
};
use crate::reverse::to_reverse_name;
use crate::utils::call_with_deadline;

/// Record types queried for a query of the given kind.
///
/// Addresses only get PTR: forward record types mean nothing for a raw IP.
/// Domains get all twelve (PTR for a domain resolves to empty without a
/// network call).
pub fn record_types_for(kind: QueryKind) -> &'static [RecordType] {
    if kind.is_ip() {
        &[RecordType::PTR]
    } else {
        &ALL_RECORD_TYPES
    }
}

/// DNS-over-HTTPS JSON client.
#[derive(Clone)]
pub struct DohResolver {
    client: Arc<reqwest::Client>,
    endpoint: String,
    timeout: Duration,
    stats: Arc<DegradationStats>,
}

impl DohResolver {
    /// Creates a resolver for `endpoint` with a per-query `timeout`.
    pub fn new(
        client: Arc<reqwest::Client>,
        endpoint: impl Into<String>,
        timeout: Duration,
        stats: Arc<DegradationStats>,
    ) -> Self {
        DohResolver {
            client,
            endpoint: endpoint.into(),
            timeout,
            stats,
        }
    }

    /// Resolves every record type appropriate for `kind`.
    ///
    /// The returned set has an entry for each selected type, empty where the
    /// query failed or timed out.
    pub async fn resolve(&self, query: &str, kind: QueryKind) -> DnsRecordSet {
        self.resolve_types(query, kind, record_types_for(kind)).await
    }

    /// Resolves the given record types concurrently.
    ///
    /// PTR uses the reverse name of `query` when `kind` is an address and is
    /// empty for domains. All queries are dispatched before any is awaited.
    pub async fn resolve_types(
        &self,
        query: &str,
        kind: QueryKind,
        types: &[RecordType],
    ) -> DnsRecordSet {
        let lookups = types.iter().map(|&record_type| async move {
            let records = match query_name_for(query, kind, record_type) {
                Some(name) => self.query(&name, record_type).await,
                None => Vec::new(),
            };
            (record_type, records)
        });

        let mut set = DnsRecordSet::new();
        for (record_type, records) in join_all(lookups).await {
            set.insert(record_type, records);
        }
        set
    }

    /// Queries one record type, degrading to an empty sequence.
    pub async fn query(&self, name: &str, record_type: RecordType) -> Vec<DnsRecord> {
        let label = format!("{} {}", record_type, name);
        call_with_deadline(
            UpstreamSource::Dns,
            &label,
            self.timeout,
            Vec::new(),
            &self.stats,
            self.try_query(name, record_type),
        )
        .await
    }

    /// Queries one record type, reporting why it failed.
    pub async fn try_query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>, Degradation> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("name", name), ("type", record_type.as_ref())])
            .header(reqwest::header::ACCEPT, DNS_JSON_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| degradation_from_reqwest(UpstreamSource::Dns, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Degradation::http_status(UpstreamSource::Dns, status.as_u16()));
        }

        let body: DohResponse = response
            .json()
            .await
            .map_err(|e| degradation_from_reqwest(UpstreamSource::Dns, &e))?;
        if body.status != 0 {
            log::debug!(
                "DoH {} {} answered with DNS status {}",
                record_type,
                name,
                body.status
            );
        }
        Ok(body.answer)
    }
}

/// Name to send for `record_type`, or `None` when no query should be made.
fn query_name_for(query: &str, kind: QueryKind, record_type: RecordType) -> Option<String> {
    if record_type == RecordType::PTR {
        return to_reverse_name(query, kind);
    }
    Some(query.to_string())
}
