/*
[INPUT]:  HTTP configuration (base URL, timeouts)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::http::{MaintenanceError, Result};

/// Default backend root
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the maintenance REST API
#[derive(Debug, Clone)]
pub struct MaintenanceClient {
    http_client: Client,
    base_url: Url,
}

impl MaintenanceClient {
    /// Create a new client against the default base URL
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and base URL
    ///
    /// The base URL may carry a path prefix (e.g. `http://host/api`); endpoint
    /// paths are resolved beneath it.
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        if config.timeout.is_zero() || config.connect_timeout.is_zero() {
            return Err(MaintenanceError::Config(
                "timeouts must be greater than zero".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL for an endpoint below the base URL
    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build request builder for an endpoint
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        tracing::debug!(%method, %url, "api request");
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode the JSON body of a successful response
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T> {
        let body = self.send_checked(builder).await?;
        serde_json::from_str(&body).map_err(|err| {
            tracing::warn!(error = %err, "api response did not match schema");
            MaintenanceError::Serialization(err)
        })
    }

    /// Send a request whose successful response carries no body
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send_checked(builder).await.map(|_| ())
    }

    async fn send_checked(&self, builder: RequestBuilder) -> Result<String> {
        let response = builder.send().await.inspect_err(|err| {
            tracing::warn!(error = %err, "api request failed");
        })?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let err = MaintenanceError::from_response(status, &body);
            tracing::warn!(status = status.as_u16(), error = %err, "api returned error");
            return Err(err);
        }
        Ok(body)
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(MaintenanceError::Config(format!(
            "base URL cannot be used as a base: {raw}"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8000", "http://localhost:8000/machines/")]
    #[case("http://localhost:8000/", "http://localhost:8000/machines/")]
    #[case("http://localhost:5173/api", "http://localhost:5173/api/machines/")]
    #[case("http://localhost:5173/api/", "http://localhost:5173/api/machines/")]
    fn test_endpoint_resolves_below_base(#[case] base: &str, #[case] expected: &str) {
        let client =
            MaintenanceClient::with_config_and_base_url(ClientConfig::default(), base).unwrap();
        assert_eq!(client.url("/machines/").unwrap().as_str(), expected);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ClientConfig {
            timeout: Duration::ZERO,
            ..ClientConfig::default()
        };
        let result = MaintenanceClient::with_config(config);
        assert!(matches!(result, Err(MaintenanceError::Config(_))));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result =
            MaintenanceClient::with_config_and_base_url(ClientConfig::default(), "not a url");
        assert!(matches!(result, Err(MaintenanceError::UrlParse(_))));
    }
}
