//! QVM REST client.
//!
//! The endpoint takes one compiled payload per `POST` and answers with a JSON
//! document describing the run.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::ConnectionConfig;
use crate::error::{QvmError, QvmResult};

/// Header carrying the user id.
pub const USER_ID_HEADER: &str = "X-User-Id";
/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// QVM REST API client.
pub struct QvmClient {
    /// HTTP client with timeouts configured.
    client: Client,
    /// Full URL payloads are posted to.
    endpoint: String,
    user_id: String,
    api_key: String,
}

impl std::fmt::Debug for QvmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QvmClient")
            .field("endpoint", &self.endpoint)
            .field("user_id", &self.user_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl QvmClient {
    /// Create a client for the endpoint and credentials in `config`.
    pub fn new(config: &ConnectionConfig) -> QvmResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(QvmError::Http)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            user_id: config.user_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// The URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post a JSON body to the endpoint, returning the decoded response.
    ///
    /// Sends exactly one request.
    #[instrument(skip(self, body))]
    pub async fn post_json(&self, body: &impl Serialize) -> QvmResult<Value> {
        debug!("POST {}", self.endpoint);

        let resp = self
            .client
            .post(&self.endpoint)
            .header(USER_ID_HEADER, &self.user_id)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        self.handle_response(resp).await
    }

    /// Handle HTTP response: decode JSON or return an error.
    async fn handle_response(&self, response: reqwest::Response) -> QvmResult<Value> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(QvmError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ConnectionConfig::new("http://127.0.0.1:1/run", "alice", "top-secret");
        let client = QvmClient::new(&config).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("alice"));
        assert!(!debug.contains("top-secret"));
        assert_eq!(client.endpoint(), "http://127.0.0.1:1/run");
    }
}
