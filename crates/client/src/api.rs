//! REST client for the mapant map-generation API.
//!
//! Wraps the dispatch endpoint (`POST /map-generation/next-job`) using
//! [`reqwest`]. The client authenticates with the worker credentials and
//! hands back the raw JSON response -- interpreting job shapes is the
//! decoder's business, not the transport's.

use mapant_core::config::WorkerConfig;

/// HTTP client for the mapant map-generation API.
pub struct MapantApi {
    client: reqwest::Client,
    base_url: String,
    bearer: String,
}

/// Errors from the dispatch API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("mapant API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl MapantApi {
    /// Create a new API client from the worker configuration.
    pub fn new(config: &WorkerConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling with the transfer layer).
    pub fn with_client(client: reqwest::Client, config: &WorkerConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            bearer: config.credentials.bearer(),
        }
    }

    /// Ask the dispatch endpoint for the next unit of work.
    ///
    /// Sends an authenticated `POST /map-generation/next-job` with no
    /// body and returns the raw JSON response. Non-success statuses are
    /// surfaced as [`ApiError::Status`] with the body text captured.
    pub async fn next_job(&self) -> Result<serde_json::Value, ApiError> {
        let response = self
            .client
            .post(format!("{}/map-generation/next-job", self.base_url))
            .header("Authorization", format!("Bearer {}", self.bearer))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<serde_json::Value>().await?)
    }
}
