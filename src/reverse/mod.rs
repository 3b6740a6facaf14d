//! Reverse-DNS name construction.
//!
//! Builds the PTR query name for an address:
//! - IPv4: octets reversed under `in-addr.arpa` (`8.8.4.4` -> `4.4.8.8.in-addr.arpa`)
//! - IPv6: the 32 nibbles of the fully expanded address, reversed and
//!   dot-separated, under `ip6.arpa`
//!
//! `from_reverse_name()` inverts the transformation (up to canonical form).

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::classify::{is_ipv4, QueryKind};

/// Reverse zone for IPv4 addresses
pub const IPV4_REVERSE_SUFFIX: &str = ".in-addr.arpa";
/// Reverse zone for IPv6 addresses
pub const IPV6_REVERSE_SUFFIX: &str = ".ip6.arpa";

/// Expands an IPv6 address to eight colon-separated, zero-padded groups.
///
/// `::` expands to as many all-zero groups as needed to reach eight, and an
/// embedded dotted-quad suffix becomes its two hex groups. Already-full
/// addresses come back unchanged apart from padding and case.
///
/// Returns `None` if `ip` is not an IPv6 address.
///
/// # Examples
///
/// ```
/// use ip_intel::reverse::expand_ipv6;
///
/// assert_eq!(
///     expand_ipv6("::1").unwrap(),
///     "0000:0000:0000:0000:0000:0000:0000:0001"
/// );
/// ```
pub fn expand_ipv6(ip: &str) -> Option<String> {
    let addr: Ipv6Addr = ip.parse().ok()?;
    Some(expand_segments(&addr))
}

fn expand_segments(addr: &Ipv6Addr) -> String {
    addr.segments()
        .iter()
        .map(|group| format!("{:04x}", group))
        .collect::<Vec<_>>()
        .join(":")
}

/// Reverse name for an IPv4 address.
pub fn ipv4_reverse_name(addr: &Ipv4Addr) -> String {
    let [a, b, c, d] = addr.octets();
    format!("{d}.{c}.{b}.{a}{IPV4_REVERSE_SUFFIX}")
}

/// Reverse name for an IPv6 address.
pub fn ipv6_reverse_name(addr: &Ipv6Addr) -> String {
    let nibbles: String = expand_segments(addr).chars().filter(|c| *c != ':').collect();
    let mut name = String::with_capacity(nibbles.len() * 2 + IPV6_REVERSE_SUFFIX.len());
    for (i, nibble) in nibbles.chars().rev().enumerate() {
        if i > 0 {
            name.push('.');
        }
        name.push(nibble);
    }
    name.push_str(IPV6_REVERSE_SUFFIX);
    name
}

/// Reverse name for any parsed address.
pub fn reverse_name_for(addr: &IpAddr) -> String {
    match addr {
        IpAddr::V4(v4) => ipv4_reverse_name(v4),
        IpAddr::V6(v6) => ipv6_reverse_name(v6),
    }
}

/// Builds the reverse-lookup name for `ip` of the given kind.
///
/// Returns `None` for `QueryKind::Domain` (reverse names exist only for
/// addresses) and for text that does not parse as the stated kind.
/// IPv4 octets with leading zeros are read as decimal.
pub fn to_reverse_name(ip: &str, kind: QueryKind) -> Option<String> {
    match kind {
        QueryKind::Ipv4 => {
            if !is_ipv4(ip) {
                return None;
            }
            let mut octets = [0u8; 4];
            for (slot, part) in octets.iter_mut().zip(ip.split('.')) {
                *slot = part.parse().ok()?;
            }
            Some(ipv4_reverse_name(&Ipv4Addr::from(octets)))
        }
        QueryKind::Ipv6 => {
            let addr: Ipv6Addr = ip.parse().ok()?;
            Some(ipv6_reverse_name(&addr))
        }
        QueryKind::Domain => None,
    }
}

/// Recovers the address from a reverse-lookup name.
///
/// Accepts names with or without a trailing dot. Returns `None` for names
/// outside the two reverse zones or with the wrong number of labels.
pub fn from_reverse_name(name: &str) -> Option<IpAddr> {
    let name = name.trim_end_matches('.').to_ascii_lowercase();

    if let Some(labels) = name.strip_suffix(IPV4_REVERSE_SUFFIX) {
        let parts: Vec<u8> = labels
            .split('.')
            .map(|p| p.parse::<u8>().ok())
            .collect::<Option<Vec<_>>>()?;
        if parts.len() != 4 {
            return None;
        }
        return Some(IpAddr::V4(Ipv4Addr::new(
            parts[3], parts[2], parts[1], parts[0],
        )));
    }

    if let Some(labels) = name.strip_suffix(IPV6_REVERSE_SUFFIX) {
        let nibbles: Vec<&str> = labels.split('.').collect();
        if nibbles.len() != 32 || nibbles.iter().any(|n| n.len() != 1) {
            return None;
        }
        let forward: String = nibbles.iter().rev().copied().collect();
        let value = u128::from_str_radix(&forward, 16).ok()?;
        return Some(IpAddr::V6(Ipv6Addr::from(value)));
    }

    None
}
