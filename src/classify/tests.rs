// Classifier tests.

use super::*;

#[test]
fn test_classify_ipv4() {
    assert_eq!(classify("8.8.8.8").unwrap(), QueryKind::Ipv4);
    assert_eq!(classify("0.0.0.0").unwrap(), QueryKind::Ipv4);
    assert_eq!(classify("255.255.255.255").unwrap(), QueryKind::Ipv4);
    // Leading zeros are accepted as decimal
    assert_eq!(classify("010.001.0.1").unwrap(), QueryKind::Ipv4);
}

#[test]
fn test_classify_ipv4_out_of_range_rejected() {
    assert!(classify("999.1.1.1").is_err());
    assert!(classify("256.0.0.1").is_err());
    assert!(classify("1.2.3.256").is_err());
}

#[test]
fn test_classify_ipv4_wrong_shape_rejected() {
    assert!(classify("1.2.3").is_err());
    assert!(classify("1.2.3.4.5").is_err());
    assert!(classify("1..2.3").is_err());
    assert!(classify("1.2.3.4 ").is_err(), "classify expects normalized input");
    assert!(classify("1234.1.1.1").is_err());
}

#[test]
fn test_classify_ipv6_forms() {
    for addr in [
        "2001:db8::1",
        "::",
        "::1",
        "2001:0db8:0000:0000:0000:ff00:0042:8329",
        "2001:db8:0:0:0:ff00:42:8329",
        "fe80::",
        "::ffff:192.0.2.128",
        "64:ff9b::192.0.2.33",
        "1:2:3:4:5:6:7::",
    ] {
        assert_eq!(
            classify(addr).unwrap(),
            QueryKind::Ipv6,
            "{} should classify as IPv6",
            addr
        );
    }
}

#[test]
fn test_classify_ipv6_invalid_rejected() {
    for addr in [
        "2001:db8::1::1",
        "12345::1",
        "1:2:3:4:5:6:7:8:9",
        "gggg::1",
        "fe80::1%eth0",
        ":",
        ":::",
    ] {
        assert!(classify(addr).is_err(), "{} should be rejected", addr);
    }
}

#[test]
fn test_classify_domain() {
    assert_eq!(classify("example.com").unwrap(), QueryKind::Domain);
    assert_eq!(classify("www.example.co.uk").unwrap(), QueryKind::Domain);
    assert_eq!(classify("my-site.example.org").unwrap(), QueryKind::Domain);
    assert_eq!(classify("1e100.net").unwrap(), QueryKind::Domain);
}

#[test]
fn test_classify_punycode_domain() {
    assert_eq!(classify("xn--80ak6aa92e.com").unwrap(), QueryKind::Domain);
    assert_eq!(classify("mail.xn--bcher-kva.example").unwrap(), QueryKind::Domain);
    assert_eq!(classify("a--b.example.org").unwrap(), QueryKind::Domain);
}

#[test]
fn test_classify_domain_rejections() {
    assert!(classify("not a domain").is_err());
    assert!(classify("localhost").is_err());
    assert!(classify("example.c").is_err(), "TLD must be at least 2 chars");
    assert!(classify("example.c0m").is_err(), "TLD must be alphabetic");
    assert!(classify("-example.com").is_err());
    assert!(classify("example-.com").is_err());
    assert!(classify("example.-com").is_err());
    assert!(classify("example.com-").is_err());
    assert!(classify("example..com").is_err());
    assert!(classify("exa_mple.com").is_err());
    assert!(classify("").is_err());
}

#[test]
fn test_classify_is_total_and_exclusive() {
    // Every input yields exactly one outcome, and IPs never double as domains
    for input in ["8.8.8.8", "::1", "example.com", "999.1.1.1", "?", "a.b.c.d"] {
        let kinds = [is_ipv4(input), is_ipv6(input), is_domain(input)];
        assert!(
            kinds.iter().filter(|k| **k).count() <= 1,
            "{} matched more than one kind",
            input
        );
        assert_eq!(
            classify(input).is_ok(),
            kinds.iter().any(|k| *k),
            "classify disagrees with predicates for {}",
            input
        );
    }
}

#[test]
fn test_rejection_is_validation_error() {
    match classify("not a domain") {
        Err(LookupError::Validation(msg)) => assert_eq!(msg, "Invalid IP address or domain"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_normalize_query() {
    assert_eq!(normalize_query("  Example.COM \n"), "example.com");
    assert_eq!(normalize_query("2001:DB8::1"), "2001:db8::1");
    assert_eq!(normalize_query("   "), "");
}

#[test]
fn test_classify_query_normalizes() {
    let q = classify_query("  WWW.Example.Com ").unwrap();
    assert_eq!(q.as_str(), "www.example.com");
    assert_eq!(q.kind(), QueryKind::Domain);

    let q = classify_query("2001:DB8::1").unwrap();
    assert_eq!(q.as_str(), "2001:db8::1");
    assert_eq!(q.kind(), QueryKind::Ipv6);
}

#[test]
fn test_classify_query_blank_is_missing() {
    match classify_query("   ") {
        Err(LookupError::Validation(msg)) => assert!(msg.contains("required")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_query_kind_wire_names() {
    assert_eq!(QueryKind::Ipv4.to_string(), "ipv4");
    assert_eq!(QueryKind::Ipv6.as_ref(), "ipv6");
    assert_eq!(
        serde_json::to_string(&QueryKind::Domain).unwrap(),
        "\"domain\""
    );
    assert!(QueryKind::Ipv4.is_ip());
    assert!(!QueryKind::Domain.is_ip());
}
