use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, USER_AGENT};
use reqwest::redirect::Policy;
use serde::Deserialize;

use crate::error::HarvestError;

/// Status the gateway reports for a page it retrieved successfully.
pub const GATEWAY_OK: u16 = 200;

/// One result from the fetch gateway: the wrapped page response plus the
/// canonical URL of the page that was actually served.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchResult {
    pub response: FetchResponse,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    pub status_code: u16,
    #[serde(default)]
    pub body: Option<String>,
}

impl FetchResult {
    /// A result is usable when the gateway reported success and carried a
    /// non-empty markup body.
    pub fn is_usable(&self) -> bool {
        self.response.status_code == GATEWAY_OK
            && self
                .response
                .body
                .as_ref()
                .is_some_and(|body| !body.is_empty())
    }
}

/// Retrieval of one page identifier through the gateway.
pub trait PageFetcher {
    fn fetch(&self, identifier: &str) -> Result<FetchResult, HarvestError>;
}

/// HTTP implementation of [`PageFetcher`] backed by a blocking client.
/// Redirects are disabled; the gateway reports the canonical URL itself.
pub struct GatewayFetcher {
    client: Client,
}

impl GatewayFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, HarvestError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));

        // Set up headers with a user agent
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".parse()?);

        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

impl PageFetcher for GatewayFetcher {
    fn fetch(&self, identifier: &str) -> Result<FetchResult, HarvestError> {
        let result: FetchResult = self.client.get(identifier).send()?.json()?;
        debug!(
            "gateway status {} for {}",
            result.response.status_code, identifier
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_parses_camel_case_status() {
        let result: FetchResult = serde_json::from_str(
            r#"{"response": {"statusCode": 200, "body": "<html></html>"}, "url": "https://example.com/a"}"#,
        )
        .unwrap();
        assert_eq!(result.response.status_code, 200);
        assert_eq!(result.url, "https://example.com/a");
        assert!(result.is_usable());
    }

    #[test]
    fn envelope_tolerates_absent_body_and_url() {
        let result: FetchResult =
            serde_json::from_str(r#"{"response": {"statusCode": 404}}"#).unwrap();
        assert_eq!(result.response.status_code, 404);
        assert!(result.response.body.is_none());
        assert_eq!(result.url, "");
        assert!(!result.is_usable());
    }

    #[test]
    fn success_status_with_empty_body_is_not_usable() {
        let result: FetchResult =
            serde_json::from_str(r#"{"response": {"statusCode": 200, "body": ""}}"#).unwrap();
        assert!(!result.is_usable());
    }
}
