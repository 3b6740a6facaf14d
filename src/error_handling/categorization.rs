//! Error categorization.
//!
//! Maps transport-level failures onto the degradation taxonomy.

use super::types::{Degradation, FailureKind, UpstreamSource};

/// Categorizes a `reqwest::Error` into a `FailureKind`.
///
/// Status errors only occur when a caller used `error_for_status()`; the
/// clients check the status themselves, so in practice this sees timeouts,
/// connect failures and body decode failures.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        return FailureKind::Timeout;
    }
    if error.status().is_some() {
        return FailureKind::HttpStatus;
    }
    if error.is_decode() {
        return FailureKind::Decode;
    }
    FailureKind::Transport
}

/// Wraps a `reqwest::Error` as a degradation of `source`.
///
/// The request URL is replaced with a placeholder in the detail.
pub fn degradation_from_reqwest(source: UpstreamSource, error: &reqwest::Error) -> Degradation {
    let mut detail = error.to_string();
    if let Some(url) = error.url() {
        detail = detail.replace(url.as_str(), "<upstream>");
    }
    Degradation::new(source, categorize_reqwest_error(error), detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Building reqwest::Error values requires a real request; the categories
    // for live failures are covered by the client tests against httptest.

    #[tokio::test]
    async fn test_connect_failure_is_transport() {
        // Port 9 on localhost is the discard service and is almost never open
        let client = reqwest::Client::new();
        let err = client
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .expect_err("nothing should be listening on port 9");
        assert_eq!(categorize_reqwest_error(&err), FailureKind::Transport);

        let degradation = degradation_from_reqwest(UpstreamSource::Geo, &err);
        assert_eq!(degradation.upstream, UpstreamSource::Geo);
        assert_eq!(degradation.kind, FailureKind::Transport);
    }
}
