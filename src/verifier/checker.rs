// src/verifier/checker.rs
use super::result::{CheckReport, CheckResult};
use crate::config::{CheckTarget, VerifierConfig};
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum VerifierError {
    #[error("Invalid target URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid header {0}")]
    InvalidHeader(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Issues one GET against a [`CheckTarget`] and classifies what comes back.
///
/// Holds no state between runs besides the HTTP client, so repeated runs
/// against the same response classify the same way.
pub struct DeployVerifier {
    config: VerifierConfig,
    client: Client,
}

impl DeployVerifier {
    pub fn new(config: VerifierConfig) -> Result<Self, VerifierError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Run the check against the configured target.
    pub async fn check(&self) -> Result<CheckReport, VerifierError> {
        self.run(&self.config.target).await
    }

    /// Run the check against `target`. Transport failures are reported in
    /// the returned [`CheckResult`]; `Err` means the target itself is malformed.
    pub async fn run(&self, target: &CheckTarget) -> Result<CheckReport, VerifierError> {
        let url = target_url(target)?;
        let headers = target_headers(target)?;

        let started_at = Utc::now();
        let start = Instant::now();

        info!("Checking {}", url);

        let response = match self.client.get(url.clone()).headers(headers).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request to {} failed: {}", url, e);
                return Ok(CheckReport {
                    url: url.to_string(),
                    status: None,
                    headers: Vec::new(),
                    result: CheckResult::TransportError(e.to_string()),
                    started_at,
                    elapsed: start.elapsed(),
                });
            }
        };

        let status = response.status().as_u16();
        let response_headers = collect_headers(&response);

        let result = match read_body(response).await {
            Ok(body) => {
                debug!("Received {} bytes from {}", body.len(), url);
                let body = String::from_utf8_lossy(&body);
                classify(
                    status,
                    &body,
                    &self.config.markers,
                    self.config.body_prefix_chars,
                )
            }
            Err(e) => {
                warn!("Reading body from {} failed: {}", url, e);
                CheckResult::TransportError(e.to_string())
            }
        };

        let elapsed = start.elapsed();
        info!("Check of {} finished in {:?}: {:?}", url, elapsed, result);

        Ok(CheckReport {
            url: url.to_string(),
            status: Some(status),
            headers: response_headers,
            result,
            started_at,
            elapsed,
        })
    }
}

/// Classify a completed response.
///
/// Markers win over the status code; a 200 without a marker keeps the first
/// `prefix_chars` characters of the body.
pub fn classify(status: u16, body: &str, markers: &[String], prefix_chars: usize) -> CheckResult {
    if markers.iter().any(|marker| body.contains(marker.as_str())) {
        CheckResult::Found
    } else if status == 200 {
        CheckResult::LoadedUnknown(body.chars().take(prefix_chars).collect())
    } else {
        CheckResult::NotFound(status)
    }
}

fn target_url(target: &CheckTarget) -> Result<Url, VerifierError> {
    let raw = target.url_string();
    Url::parse(&raw).map_err(|source| VerifierError::InvalidUrl { url: raw, source })
}

fn target_headers(target: &CheckTarget) -> Result<HeaderMap, VerifierError> {
    let mut headers = HeaderMap::new();

    for (name, value) in &target.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| VerifierError::InvalidHeader(name.clone()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| VerifierError::InvalidHeader(format!("{}: {}", name, value)))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

fn collect_headers(response: &Response) -> Vec<(String, String)> {
    response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

async fn read_body(mut response: Response) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn markers() -> Vec<String> {
        VerifierConfig::default().markers
    }

    #[test]
    fn test_english_marker_is_found() {
        let body = "<html><div id=\"GoodbyePage\"></div></html>";

        assert_eq!(classify(200, body, &markers(), 500), CheckResult::Found);
    }

    #[test]
    fn test_russian_marker_is_found() {
        let body = "<h1>Нам очень жаль, что вы уходите</h1>";

        assert_eq!(classify(200, body, &markers(), 500), CheckResult::Found);
    }

    #[test]
    fn test_marker_wins_over_status() {
        let body = "GoodbyePage";

        assert_eq!(classify(404, body, &markers(), 500), CheckResult::Found);
    }

    #[test]
    fn test_ok_without_marker_keeps_prefix() {
        let body = "x".repeat(800);

        match classify(200, &body, &markers(), 500) {
            CheckResult::LoadedUnknown(prefix) => assert_eq!(prefix, "x".repeat(500)),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_short_body_is_kept_whole() {
        assert_eq!(
            classify(200, "hello", &markers(), 500),
            CheckResult::LoadedUnknown("hello".to_string())
        );
    }

    #[test]
    fn test_prefix_counts_characters_not_bytes() {
        let body = "ж".repeat(600);

        match classify(200, &body, &markers(), 500) {
            CheckResult::LoadedUnknown(prefix) => {
                assert_eq!(prefix.chars().count(), 500);
                assert_eq!(prefix.len(), 1000);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_non_ok_without_marker_is_not_found() {
        assert_eq!(
            classify(404, "Not Found", &markers(), 500),
            CheckResult::NotFound(404)
        );
        assert_eq!(classify(301, "", &markers(), 500), CheckResult::NotFound(301));
    }

    #[test]
    fn test_target_url_rejects_garbage() {
        let target = CheckTarget::new("exa mple.com", "/goodbye");

        assert!(matches!(
            target_url(&target),
            Err(VerifierError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_target_headers_rejects_bad_name() {
        let target = CheckTarget::default().with_header("Bad Header", "x");

        assert!(matches!(
            target_headers(&target),
            Err(VerifierError::InvalidHeader(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_unknown_prefix_is_leading_chars(body in "[a-zа-я ]{0,1200}", n in 1usize..700) {
            let result = classify(200, &body, &markers(), n);
            let expected: String = body.chars().take(n).collect();
            prop_assert_eq!(result, CheckResult::LoadedUnknown(expected));
        }
    }
}
