//! Abuse reputation client (AbuseIPDB v2 `check`).

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::{HEADER_ABUSEIPDB_KEY, JSON_MEDIA_TYPE};
use crate::error_handling::{
    degradation_from_reqwest, Degradation, DegradationStats, UpstreamSource,
};
use crate::utils::call_with_deadline;

/// Abuse reputation for one address (the `data` member of the upstream reply).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AbuseRecord {
    pub ip_address: Option<String>,
    /// 0-100
    pub abuse_confidence_score: u32,
    pub total_reports: u32,
    pub last_reported_at: Option<String>,
    pub usage_type: Option<String>,
    pub isp: Option<String>,
    pub domain: Option<String>,
    pub is_whitelisted: Option<bool>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Upstream envelope: `{"data": {...}}`.
#[derive(Debug, Deserialize)]
struct AbuseEnvelope {
    data: AbuseRecord,
}

/// Client for the abuse reputation provider.
///
/// Without an API key every fetch is absent and no request is made.
#[derive(Clone)]
pub struct AbuseClient {
    client: Arc<reqwest::Client>,
    endpoint: String,
    api_key: Option<String>,
    max_age_days: u32,
    timeout: Duration,
    stats: Arc<DegradationStats>,
}

impl AbuseClient {
    pub fn new(
        client: Arc<reqwest::Client>,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        max_age_days: u32,
        timeout: Duration,
        stats: Arc<DegradationStats>,
    ) -> Self {
        AbuseClient {
            client,
            endpoint: endpoint.into(),
            api_key,
            max_age_days,
            timeout,
            stats,
        }
    }

    /// True if a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetches the abuse record for `ip`.
    ///
    /// Returns `None` when no credential is configured, or on timeout,
    /// non-2xx, transport or decode failure.
    pub async fn fetch_abuse(&self, ip: &str) -> Option<AbuseRecord> {
        call_with_deadline(
            UpstreamSource::Abuse,
            ip,
            self.timeout,
            None,
            &self.stats,
            async { self.try_fetch_abuse(ip).await.map(Some) },
        )
        .await
    }

    /// Fetches the abuse record for `ip`, reporting why it is absent.
    pub async fn try_fetch_abuse(&self, ip: &str) -> Result<AbuseRecord, Degradation> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Degradation::no_credential(UpstreamSource::Abuse))?;

        let max_age = self.max_age_days.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ipAddress", ip),
                ("maxAgeInDays", max_age.as_str()),
                ("verbose", ""),
            ])
            .header(HEADER_ABUSEIPDB_KEY, api_key)
            .header(reqwest::header::ACCEPT, JSON_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| degradation_from_reqwest(UpstreamSource::Abuse, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Degradation::http_status(
                UpstreamSource::Abuse,
                status.as_u16(),
            ));
        }

        let envelope: AbuseEnvelope = response
            .json()
            .await
            .map_err(|e| degradation_from_reqwest(UpstreamSource::Abuse, &e))?;
        Ok(envelope.data)
    }
}
