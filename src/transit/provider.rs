//! Departure provider access.
//!
//! [`DepartureSource`] is the seam between the service and the network:
//! [`MetrolinxClient`] talks to the real provider, [`StaticDepartureSource`]
//! serves a canned payload in tests.

use std::time::Duration;

use futures::future::{self, BoxFuture};
use futures::{AsyncReadExt, FutureExt};
use isahc::config::Configurable;
use isahc::HttpClient;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use super::{all_departures, normalize_departures, Departure, TimePolicy, TransitError};
use crate::config::TransitConfig;

/// Anything that can produce a raw provider response.
pub trait DepartureSource: Send + Sync {
    /// Fetches the full provider payload (the object holding `AllDepartures`).
    fn fetch(&self) -> BoxFuture<'_, Result<Value, TransitError>>;
}

/// Fetches from `source` and normalizes the result.
///
/// # Errors
///
/// Returns whatever the source fails with, or
/// [`TransitError::InvalidTime`] under [`TimePolicy::Abort`].
pub async fn fetch_departures(
    source: &dyn DepartureSource,
    limit: usize,
    policy: TimePolicy,
) -> Result<Vec<Departure>, TransitError> {
    let payload = source.fetch().await?;
    normalize_departures(all_departures(&payload), limit, policy)
}

/// HTTP client for the Metrolinx departures endpoint.
pub struct MetrolinxClient {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl MetrolinxClient {
    /// Builds a client from the transit settings.
    ///
    /// A missing key is not an error here; each fetch checks it before any
    /// request is sent.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransitError::Http(e.to_string()))?;

        let api_key = config.resolved_api_key();
        info!(
            base_url = %config.base_url,
            has_key = api_key.is_some(),
            timeout_secs = config.timeout_secs,
            "Configured departure provider"
        );

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
        })
    }

    /// Full request URL, `{base}?key={key}` with the key form-encoded.
    pub fn request_url(&self) -> Result<String, TransitError> {
        let key = self.api_key.as_deref().ok_or(TransitError::MissingApiKey)?;
        let url = Url::parse_with_params(&self.base_url, &[("key", key)]).map_err(|e| {
            TransitError::Http(format!("invalid provider URL '{}': {e}", self.base_url))
        })?;
        Ok(url.into())
    }
}

impl DepartureSource for MetrolinxClient {
    fn fetch(&self) -> BoxFuture<'_, Result<Value, TransitError>> {
        async move {
            let url = self.request_url()?;
            debug!(base_url = %self.base_url, "Requesting departures");

            let mut response = self
                .client
                .get_async(url.as_str())
                .await
                .map_err(|e| TransitError::Http(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(TransitError::Status {
                    status: status.as_u16(),
                });
            }

            let mut body = Vec::new();
            response
                .body_mut()
                .read_to_end(&mut body)
                .await
                .map_err(|e| TransitError::Http(e.to_string()))?;
            debug!(bytes = body.len(), "Received departures");

            serde_json::from_slice(&body).map_err(|e| TransitError::Body(e.to_string()))
        }
        .boxed()
    }
}

/// Source that always answers with the same payload or error.
#[derive(Debug, Clone)]
pub struct StaticDepartureSource {
    response: Result<Value, TransitError>,
}

impl StaticDepartureSource {
    /// Serves `payload` on every fetch.
    #[must_use]
    pub const fn new(payload: Value) -> Self {
        Self {
            response: Ok(payload),
        }
    }

    /// Fails every fetch with `error`.
    #[must_use]
    pub const fn failing(error: TransitError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

impl DepartureSource for StaticDepartureSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Value, TransitError>> {
        future::ready(self.response.clone()).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client_with_key(key: Option<&str>) -> MetrolinxClient {
        let config = TransitConfig {
            base_url: "https://example.test/departures".to_string(),
            ..TransitConfig::default()
        };
        let mut client = MetrolinxClient::new(&config).unwrap();
        client.api_key = key.map(str::to_string);
        client
    }

    #[test]
    fn test_request_url() {
        let client = client_with_key(Some("abc"));
        assert_eq!(
            client.request_url().unwrap(),
            "https://example.test/departures?key=abc"
        );
    }

    #[test]
    fn test_request_url_encodes_key() {
        let client = client_with_key(Some("a&b=c#d+e f"));
        assert_eq!(
            client.request_url().unwrap(),
            "https://example.test/departures?key=a%26b%3Dc%23d%2Be+f"
        );
    }

    #[test]
    fn test_request_url_keeps_existing_query() {
        let config = TransitConfig {
            base_url: "https://example.test/departures?format=json".to_string(),
            ..TransitConfig::default()
        };
        let mut client = MetrolinxClient::new(&config).unwrap();
        client.api_key = Some("k1".to_string());
        assert_eq!(
            client.request_url().unwrap(),
            "https://example.test/departures?format=json&key=k1"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let client = client_with_key(None);
        assert_eq!(client.request_url(), Err(TransitError::MissingApiKey));
        assert_eq!(client.fetch().await, Err(TransitError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_fetch_departures_from_static_source() {
        let source = StaticDepartureSource::new(json!({
            "AllDepartures": {"Trip": [
                {"Service": "B", "Time": "2024-01-01 09:00:00", "Stops": []},
                {"Service": "A", "Time": "2024-01-01 08:00:00", "Stops": []}
            ]}
        }));

        let out = fetch_departures(&source, 1, TimePolicy::Abort).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].line.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_fetch_departures_without_field() {
        let source = StaticDepartureSource::new(json!({"Metadata": {}}));
        let out = fetch_departures(&source, 10, TimePolicy::Abort).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_departures_propagates_source_error() {
        let source = StaticDepartureSource::failing(TransitError::Status { status: 500 });
        assert_eq!(
            fetch_departures(&source, 10, TimePolicy::Abort).await,
            Err(TransitError::Status { status: 500 })
        );
    }
}
