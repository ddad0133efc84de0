//! Platform REST backend client.
//!
//! The platform backend owns orders, payments, and customer email. This
//! module consumes its JSON API contract-only: list orders, mutate order
//! status and tracking, confirm payments, and append order-transaction
//! audit records.
//!
//! # Authentication
//!
//! Every call carries the service bearer token from configuration.

mod orders;
mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use url::Url;

use crate::config::PlatformApiConfig;

/// Request timeout for backend calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when calling the platform backend.
#[derive(Debug, Error)]
pub enum PlatformApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unauthorized (invalid or expired service token).
    #[error("Unauthorized: invalid service token")]
    Unauthorized,

    /// Failed to build the client or a request URL.
    #[error("Client error: {0}")]
    Client(String),
}

/// Platform backend API client.
#[derive(Clone)]
pub struct PlatformClient {
    inner: Arc<PlatformClientInner>,
}

struct PlatformClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl PlatformClient {
    /// Create a new platform API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the token is
    /// not a valid header value.
    pub fn new(config: &PlatformApiConfig) -> Result<Self, PlatformApiError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.service_token.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| PlatformApiError::Client(format!("Invalid service token: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(PlatformClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// Resolve a path against the configured base URL.
    fn url(&self, path: &str) -> Result<Url, PlatformApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| PlatformApiError::Client(format!("Invalid API path {path}: {e}")))
    }

    /// Execute a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, PlatformApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PlatformApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.post(url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a PATCH request with a JSON body.
    pub(crate) async fn patch<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PlatformApiError> {
        let url = self.url(path)?;
        let response = self.inner.client.patch(url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Map backend response statuses to results.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PlatformApiError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PlatformApiError::Unauthorized);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            let path = response.url().path().to_string();
            return Err(PlatformApiError::NotFound(path));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(PlatformApiError::RateLimited(retry_after));
        }

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(PlatformApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// Error payload the backend returns on failures.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_config() -> PlatformApiConfig {
        PlatformApiConfig {
            base_url: Url::parse("https://api.example.test/").expect("url"),
            service_token: SecretString::from("tok-3kS9dLq2"),
        }
    }

    #[test]
    fn test_client_creation() {
        assert!(PlatformClient::new(&test_config()).is_ok());
    }

    #[test]
    fn test_url_join() {
        let client = PlatformClient::new(&test_config()).expect("client");
        let url = client.url("order/orders").expect("join");
        assert_eq!(url.as_str(), "https://api.example.test/order/orders");
    }
}
