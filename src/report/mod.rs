//! Plain-text rendering of lookup results.
//!
//! `render_card()` draws the box served by `/api/curl` and printed by
//! `ip_intel lookup --format text`. Missing values print as `N/A`.

use std::fmt;

use crate::config::{THREAT_HIGH_THRESHOLD, THREAT_MEDIUM_THRESHOLD};
use crate::lookup::AggregatedResult;

/// Title line of the card
pub const CARD_TITLE: &str = "IP LOOKUP RESULTS";

const NOT_AVAILABLE: &str = "N/A";

/// Threat classification of an abuse confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatLevel {
    Clean,
    Medium,
    High,
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ThreatLevel::Clean => "Clean",
            ThreatLevel::Medium => "Medium",
            ThreatLevel::High => "High Threat",
        };
        f.write_str(label)
    }
}

/// `> 75` is high, `> 25` is medium, anything else is clean.
pub fn threat_level(score: u32) -> ThreatLevel {
    if score > u32::from(THREAT_HIGH_THRESHOLD) {
        ThreatLevel::High
    } else if score > u32::from(THREAT_MEDIUM_THRESHOLD) {
        ThreatLevel::Medium
    } else {
        ThreatLevel::Clean
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Lines of the card body, unpadded.
pub fn card_lines(result: &AggregatedResult) -> Vec<String> {
    let geo = result.geo.as_ref();
    let location = geo.and_then(|g| g.location.as_ref());
    let asn = geo.and_then(|g| g.asn.as_ref());
    let company = geo.and_then(|g| g.company.as_ref());
    let abuse = result.abuse.as_ref();

    let coordinate = |value: Option<f64>| {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };
    let abuse_score = abuse
        .map(|a| format!("{}% ({} reports)", a.abuse_confidence_score, a.total_reports))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let threat = result
        .abuse_score()
        .map(threat_level)
        .unwrap_or(ThreatLevel::Clean);

    vec![
        format!("IP Address:    {}", result.target_ip()),
        format!("Hostname:      {}", or_na(result.hostname())),
        format!("Type:          {}", result.kind.as_ref().to_uppercase()),
        String::new(),
        "LOCATION".to_string(),
        format!(
            "Country:       {} ({})",
            or_na(location.and_then(|l| l.country.as_deref())),
            or_na(location.and_then(|l| l.country_code.as_deref()))
        ),
        format!("State:         {}", or_na(location.and_then(|l| l.state.as_deref()))),
        format!("City:          {}", or_na(location.and_then(|l| l.city.as_deref()))),
        format!(
            "Coordinates:   {}, {}",
            coordinate(location.and_then(|l| l.latitude)),
            coordinate(location.and_then(|l| l.longitude))
        ),
        format!("Timezone:      {}", or_na(location.and_then(|l| l.timezone.as_deref()))),
        String::new(),
        "NETWORK".to_string(),
        format!("ISP:           {}", or_na(result.isp())),
        format!(
            "ASN:           {}",
            asn.and_then(|a| a.asn)
                .map(|n| format!("AS{n}"))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        ),
        format!("Network:       {}", or_na(asn.and_then(|a| a.route.as_deref()))),
        format!(
            "Company:       {} ({})",
            or_na(company.and_then(|c| c.name.as_deref())),
            or_na(company.and_then(|c| c.kind.as_deref()))
        ),
        String::new(),
        "SECURITY".to_string(),
        format!("Abuse Score:   {}", abuse_score),
        format!("Threat Level:  {}", threat),
        format!("VPN:           {}", yes_no(geo.is_some_and(|g| g.is_vpn))),
        format!("Proxy:         {}", yes_no(geo.is_some_and(|g| g.is_proxy))),
        format!("Tor:           {}", yes_no(geo.is_some_and(|g| g.is_tor))),
        format!("Datacenter:    {}", yes_no(geo.is_some_and(|g| g.is_datacenter))),
        format!(
            "Whitelisted:   {}",
            yes_no(abuse.and_then(|a| a.is_whitelisted).unwrap_or(false))
        ),
    ]
}

/// Draws `lines` in a double-line box under a centred `title`.
///
/// Every row has the same width: lines are right-padded to the widest line
/// (or the title, if wider).
pub fn format_box(lines: &[String], title: &str) -> String {
    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0);
    let rule = "═".repeat(width + 2);
    let title_len = title.chars().count();
    let left = (width - title_len) / 2;
    let right = width - title_len - left;

    let mut out = String::new();
    out.push_str(&format!("╔{rule}╗\n"));
    out.push_str(&format!(
        "║ {}{}{} ║\n",
        " ".repeat(left),
        title,
        " ".repeat(right)
    ));
    out.push_str(&format!("╠{rule}╣\n"));
    for line in lines {
        let pad = width - line.chars().count();
        out.push_str(&format!("║ {}{} ║\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!("╚{rule}╝\n"));
    out
}

/// Renders the full terminal card for a lookup result.
pub fn render_card(result: &AggregatedResult) -> String {
    format_box(&card_lines(result), CARD_TITLE)
}
