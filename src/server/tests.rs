//! Handler tests against mock upstreams.

use super::*;
use crate::config::Config;
use crate::error_handling::LookupError;
use crate::lookup::IntelLookup;
use axum::body::to_bytes;
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use httptest::{matchers::*, responders::*, Expectation, Server};
use std::sync::Arc;
use std::time::Duration;

fn test_state(server: &Server) -> AppState {
    let config = Config {
        dns_endpoint: server.url_str("/dns-query"),
        geo_endpoint: server.url_str("/geo"),
        abuse_endpoint: server.url_str("/abuse"),
        abuse_api_key: None,
        dns_timeout: Duration::from_secs(2),
        upstream_timeout: Duration::from_secs(2),
        ..Default::default()
    };
    AppState::new(IntelLookup::new(&config, Arc::new(reqwest::Client::new())))
}

/// Mock answers for an address lookup: empty PTR and a small geo document.
fn expect_address_lookup(server: &Server) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/dns-query"))
            .times(1)
            .respond_with(status_code(200).body(r#"{"Status": 0}"#)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/geo"))
            .times(1)
            .respond_with(status_code(200).body(
                r#"{"ip": "203.0.113.9", "location": {"city": "Lisbon", "country": "Portugal"}}"#,
            )),
    );
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn params(q: Option<&str>) -> Query<LookupParams> {
    Query(LookupParams {
        q: q.map(str::to_string),
    })
}

#[tokio::test]
async fn test_lookup_missing_query() {
    let server = Server::run();
    let response = lookup_handler(State(test_state(&server)), params(None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Query parameter \"q\" is required"
    );

    let response = lookup_handler(State(test_state(&server)), params(Some(""))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lookup_invalid_query() {
    let server = Server::run();
    let response = lookup_handler(State(test_state(&server)), params(Some("not a domain"))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid IP address or domain");
}

#[tokio::test]
async fn test_lookup_unresolvable_domain() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/dns-query"))
            .times(2)
            .respond_with(status_code(200).body(r#"{"Status": 3}"#)),
    );

    let response =
        lookup_handler(State(test_state(&server)), params(Some("nx.example.com"))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Could not resolve domain");
}

#[tokio::test]
async fn test_lookup_success_json() {
    let server = Server::run();
    expect_address_lookup(&server);

    let response = lookup_handler(State(test_state(&server)), params(Some("203.0.113.9"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["query"], "203.0.113.9");
    assert_eq!(json["type"], "ipv4");
    assert_eq!(json["geo"]["location"]["city"], "Lisbon");
    assert!(json["abuse"].is_null());
    assert_eq!(json["dns"]["PTR"], serde_json::json!([]));
}

#[tokio::test]
async fn test_curl_renders_card() {
    let server = Server::run();
    expect_address_lookup(&server);

    let response = curl_handler(State(test_state(&server)), params(Some("203.0.113.9"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_text(response).await;
    assert!(text.contains("IP LOOKUP RESULTS"));
    assert!(text.contains("City:          Lisbon"));
}

#[tokio::test]
async fn test_curl_errors_are_plain_text() {
    let server = Server::run();
    let response = curl_handler(State(test_state(&server)), params(Some("bad input"))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Error: Invalid IP address or domain\n");

    let response = curl_handler(State(test_state(&server)), params(None)).await;
    assert_eq!(
        body_text(response).await,
        "Error: Query parameter \"q\" is required\n"
    );
}

#[tokio::test]
async fn test_asn_parameter_validation() {
    let server = Server::run();
    let response = asn_handler(
        State(test_state(&server)),
        Query(AsnParams { asn: None }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "asn parameter is required");

    let response = asn_handler(
        State(test_state(&server)),
        Query(AsnParams {
            asn: Some("ASXYZ".to_string()),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid ASN format");
}

#[tokio::test]
async fn test_asn_relays_document_with_cors() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::query(url_decoded(contains(("q", "AS13335")))))
            .times(1)
            .respond_with(status_code(200).body(r#"{"asn": 13335, "org": "Cloudflare, Inc."}"#)),
    );

    let response = asn_handler(
        State(test_state(&server)),
        Query(AsnParams {
            asn: Some("AS13335".to_string()),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert_eq!(body_json(response).await["org"], "Cloudflare, Inc.");
}

#[tokio::test]
async fn test_asn_upstream_failure_is_500() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/geo"))
            .respond_with(status_code(503)),
    );

    let response = asn_handler(
        State(test_state(&server)),
        Query(AsnParams {
            asn: Some("15169".to_string()),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_myip_uses_forwarding_headers() {
    let mut headers = HeaderMap::new();
    headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.4, 10.0.0.1"));
    let peer = ConnectInfo("127.0.0.1:50000".parse::<std::net::SocketAddr>().unwrap());

    let response = myip_handler(headers, Some(peer)).await;
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    assert_eq!(body_json(response).await["ip"], "198.51.100.4");

    let response = myip_handler(HeaderMap::new(), None).await;
    assert_eq!(body_json(response).await["ip"], UNKNOWN_CLIENT);
}

#[tokio::test]
async fn test_root_banner_for_browsers() {
    // No expectations: a browser request must not trigger a lookup
    let server = Server::run();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static("Mozilla/5.0 (Macintosh) Safari/605.1.15"),
    );

    let response = root_handler(State(test_state(&server)), headers, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("/api/lookup"));
}

#[tokio::test]
async fn test_root_looks_up_cli_caller() {
    let server = Server::run();
    expect_address_lookup(&server);

    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.5.0"));
    headers.insert("cf-connecting-ip", HeaderValue::from_static("203.0.113.9"));

    let response = root_handler(State(test_state(&server)), headers, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["query"], "203.0.113.9");
    assert_eq!(json["geo"]["location"]["country"], "Portugal");
}

#[tokio::test]
async fn test_stats_reports_degradations() {
    let server = Server::run();
    expect_address_lookup(&server);
    let state = test_state(&server);

    let response = lookup_handler(State(state.clone()), params(Some("203.0.113.9"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(stats_handler(State(state)).await).await;
    // No abuse key configured: one NoCredential degradation
    assert_eq!(json["degradations"]["abuse"]["NoCredential"], 1);
    assert_eq!(json["degradations"]["dns"]["total"], 0);
    assert_eq!(json["total"], 1);
}

async fn panicking_lookup() -> Result<(), LookupError> {
    panic!("parser bug: secret-token-123")
}

#[tokio::test]
async fn test_panicking_lookup_is_generic_500() {
    let err = handlers::isolated(panicking_lookup()).await.unwrap_err();
    assert!(matches!(err, LookupError::Internal(_)));

    let response = handlers::json_error(&err);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&body).unwrap()["error"],
        "Internal server error"
    );
    assert!(!body.contains("secret-token-123"));

    let text = body_text(handlers::text_error(&err)).await;
    assert_eq!(text, "Error: Internal server error\n");
}

#[tokio::test]
async fn test_isolated_passes_results_through() {
    let ok = handlers::isolated(async { Ok::<_, LookupError>(7) }).await;
    assert_eq!(ok.unwrap(), 7);

    let err = handlers::isolated(async { Err::<(), _>(LookupError::invalid_query()) }).await;
    assert_eq!(err.unwrap_err().http_status(), 400);
}
