//! Lookup orchestration.
//!
//! Turns one raw query into an `AggregatedResult`:
//! 1. Normalize and classify (rejects before any network I/O)
//! 2. For domains, resolve A then AAAA to find the address to investigate
//! 3. Fan out DNS, geolocation and abuse concurrently and join the results
//!
//! Only steps 1 and 2 can fail the lookup. Everything in step 3 degrades to
//! an empty or absent field.

mod result;

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use crate::classify::{classify_query, ClassifiedQuery, QueryKind};
use crate::config::Config;
use crate::dns::{DnsRecordSet, DohResolver, RecordType, ADDRESS_RECORD_TYPES, ALL_RECORD_TYPES};
use crate::error_handling::{DegradationStats, InitializationError, LookupError};
use crate::initialization::init_client;
use crate::intel::{AbuseClient, GeoClient};

pub use result::AggregatedResult;

/// Resolution orchestrator.
///
/// Holds only immutable clients and the shared degradation counters, so one
/// instance can serve concurrent lookups behind an `Arc`.
#[derive(Clone)]
pub struct IntelLookup {
    dns: DohResolver,
    geo: GeoClient,
    abuse: AbuseClient,
    stats: Arc<DegradationStats>,
}

impl IntelLookup {
    /// Builds the orchestrator on an existing HTTP client.
    pub fn new(config: &Config, client: Arc<reqwest::Client>) -> Self {
        let stats = Arc::new(DegradationStats::new());
        IntelLookup {
            dns: DohResolver::new(
                Arc::clone(&client),
                config.dns_endpoint.clone(),
                config.dns_timeout,
                Arc::clone(&stats),
            ),
            geo: GeoClient::new(
                Arc::clone(&client),
                config.geo_endpoint.clone(),
                config.upstream_timeout,
                Arc::clone(&stats),
            ),
            abuse: AbuseClient::new(
                client,
                config.abuse_endpoint.clone(),
                config.abuse_api_key.clone(),
                config.abuse_max_age_days,
                config.upstream_timeout,
                Arc::clone(&stats),
            ),
            stats,
        }
    }

    /// Builds the orchestrator with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        Ok(Self::new(config, client))
    }

    /// Degradation counters shared by every upstream client.
    pub fn stats(&self) -> &DegradationStats {
        &self.stats
    }

    /// The geolocation client (also used for ASN detail).
    pub fn geo(&self) -> &GeoClient {
        &self.geo
    }

    /// Looks up a raw, unnormalized query.
    ///
    /// # Errors
    ///
    /// - `LookupError::Validation` for a blank or unclassifiable query (no
    ///   network I/O happens)
    /// - `LookupError::Resolution` for a domain with no usable A or AAAA
    ///   record (geolocation and abuse are not called)
    pub async fn lookup(&self, raw: &str) -> Result<AggregatedResult, LookupError> {
        let query = classify_query(raw)?;
        self.lookup_classified(&query).await
    }

    /// Looks up an already-classified query.
    pub async fn lookup_classified(
        &self,
        query: &ClassifiedQuery,
    ) -> Result<AggregatedResult, LookupError> {
        log::debug!("Looking up {} ({})", query.as_str(), query.kind());
        match query.kind() {
            QueryKind::Ipv4 | QueryKind::Ipv6 => Ok(self.lookup_address(query).await),
            QueryKind::Domain => self.lookup_domain(query).await,
        }
    }

    async fn lookup_address(&self, query: &ClassifiedQuery) -> AggregatedResult {
        let ip = query.as_str();
        let (dns, geo, abuse) = tokio::join!(
            self.dns.resolve(ip, query.kind()),
            self.geo.fetch_geo(ip),
            self.abuse.fetch_abuse(ip),
        );

        AggregatedResult {
            query: ip.to_string(),
            kind: query.kind(),
            query_kind: query.kind(),
            resolved_ip: None,
            geo,
            abuse,
            dns,
            timestamp: now_millis(),
        }
    }

    async fn lookup_domain(&self, query: &ClassifiedQuery) -> Result<AggregatedResult, LookupError> {
        let domain = query.as_str();
        let mut dns = self
            .dns
            .resolve_types(domain, QueryKind::Domain, &ADDRESS_RECORD_TYPES)
            .await;

        let (resolved_ip, resolved_type) = match pick_address(&dns) {
            Some(found) => found,
            None => {
                log::info!("{} has no usable A or AAAA record", domain);
                return Err(LookupError::Resolution(domain.to_string()));
            }
        };
        log::debug!("{} resolved to {} ({})", domain, resolved_ip, resolved_type);

        let remaining: Vec<RecordType> = ALL_RECORD_TYPES
            .iter()
            .copied()
            .filter(|t| !ADDRESS_RECORD_TYPES.contains(t))
            .collect();
        let (rest, geo, abuse) = tokio::join!(
            self.dns.resolve_types(domain, QueryKind::Domain, &remaining),
            self.geo.fetch_geo(&resolved_ip),
            self.abuse.fetch_abuse(&resolved_ip),
        );
        dns.merge(rest);

        Ok(AggregatedResult {
            query: domain.to_string(),
            kind: resolved_type,
            query_kind: QueryKind::Domain,
            resolved_ip: Some(resolved_ip),
            geo,
            abuse,
            dns,
            timestamp: now_millis(),
        })
    }
}

/// First A answer that is an IPv4 address, else first AAAA answer that is an
/// IPv6 address.
///
/// Answers for a name behind a CNAME start with the CNAME record itself, so
/// entries whose data is not an address are skipped.
fn pick_address(dns: &DnsRecordSet) -> Option<(String, QueryKind)> {
    let v4 = dns
        .get(RecordType::A)
        .iter()
        .find_map(|r| r.data.parse::<Ipv4Addr>().ok())
        .map(|ip| (ip.to_string(), QueryKind::Ipv4));
    v4.or_else(|| {
        dns.get(RecordType::AAAA)
            .iter()
            .find_map(|r| r.data.parse::<Ipv6Addr>().ok())
            .map(|ip| (ip.to_string(), QueryKind::Ipv6))
    })
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
