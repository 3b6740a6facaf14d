//! Geolocation / ASN client (ipapi.is).

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::JSON_MEDIA_TYPE;
use crate::error_handling::{
    degradation_from_reqwest, Degradation, DegradationStats, UpstreamSource,
};
use crate::utils::call_with_deadline;

/// Geolocation document for one address.
///
/// Only the fields the lookup surfaces are typed; everything else the
/// provider returns is kept in `extra` and passed through on serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoRecord {
    pub ip: Option<String>,
    /// Regional Internet Registry (ARIN, RIPE, ...)
    pub rir: Option<String>,
    pub is_bogon: bool,
    pub is_mobile: bool,
    pub is_crawler: bool,
    pub is_datacenter: bool,
    pub is_tor: bool,
    pub is_proxy: bool,
    pub is_vpn: bool,
    pub is_abuser: bool,
    pub company: Option<GeoCompany>,
    pub asn: Option<GeoAsn>,
    pub location: Option<GeoLocation>,
    pub datacenter: Option<GeoDatacenter>,
    pub abuse: Option<AbuseContact>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoCompany {
    pub name: Option<String>,
    pub domain: Option<String>,
    /// "isp", "hosting", "business", ...
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub network: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoAsn {
    pub asn: Option<u64>,
    /// Announced prefix containing the address
    pub route: Option<String>,
    pub descr: Option<String>,
    pub org: Option<String>,
    pub domain: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoLocation {
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub continent: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoDatacenter {
    pub datacenter: Option<String>,
    pub network: Option<String>,
    pub service: Option<String>,
}

/// Abuse contact published for the network (not the abuse score).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbuseContact {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl GeoRecord {
    pub fn city(&self) -> Option<&str> {
        self.location.as_ref()?.city.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.location.as_ref()?.country.as_deref()
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref()?.name.as_deref()
    }

    pub fn asn_number(&self) -> Option<u64> {
        self.asn.as_ref()?.asn
    }
}

/// Client for the geolocation provider.
///
/// Also serves ASN detail documents (see `fetch_asn`), which come from the
/// same endpoint.
#[derive(Clone)]
pub struct GeoClient {
    pub(super) client: Arc<reqwest::Client>,
    pub(super) endpoint: String,
    pub(super) timeout: Duration,
    stats: Arc<DegradationStats>,
}

impl GeoClient {
    pub fn new(
        client: Arc<reqwest::Client>,
        endpoint: impl Into<String>,
        timeout: Duration,
        stats: Arc<DegradationStats>,
    ) -> Self {
        GeoClient {
            client,
            endpoint: endpoint.into(),
            timeout,
            stats,
        }
    }

    /// Fetches the geolocation record for `ip`.
    ///
    /// Returns `None` on timeout, non-2xx, transport or decode failure; the
    /// failure is logged and counted.
    pub async fn fetch_geo(&self, ip: &str) -> Option<GeoRecord> {
        call_with_deadline(
            UpstreamSource::Geo,
            ip,
            self.timeout,
            None,
            &self.stats,
            async { self.try_fetch_geo(ip).await.map(Some) },
        )
        .await
    }

    /// Fetches the geolocation record for `ip`, reporting why it failed.
    pub async fn try_fetch_geo(&self, ip: &str) -> Result<GeoRecord, Degradation> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", ip)])
            .header(reqwest::header::ACCEPT, JSON_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| degradation_from_reqwest(UpstreamSource::Geo, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Degradation::http_status(UpstreamSource::Geo, status.as_u16()));
        }

        response
            .json::<GeoRecord>()
            .await
            .map_err(|e| degradation_from_reqwest(UpstreamSource::Geo, &e))
    }
}
