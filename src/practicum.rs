//! Homework status endpoint client.
//!
//! Issues `GET <endpoint>?from_date=<unix>` with an `Authorization: OAuth`
//! header and returns the parsed JSON body. Shape validation is left to
//! [`crate::homework::check_response`].

use crate::config::{BotConfig, Credentials};
use crate::error::{BotError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Source of raw status payloads.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch statuses changed since `from_date` (Unix seconds).
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// Client for the Practicum homework status API.
pub struct PracticumClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl PracticumClient {
    /// Create a client with an explicit endpoint and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Config`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        })
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::Config`] if the HTTP client cannot be built.
    pub fn from_config(config: &BotConfig, credentials: &Credentials) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            credentials.practicum_token.clone(),
            config.request_timeout(),
        )
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        debug!(from_date, endpoint = %self.endpoint, "requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                debug!(error = %e, "status endpoint unreachable");
                BotError::EndpointUnreachable(e.to_string())
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            debug!(status = status.as_u16(), "status endpoint returned an error");
            return Err(BotError::EndpointError {
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                BotError::EndpointUnreachable(e.to_string())
            } else {
                BotError::MalformedResponse(format!("тело ответа не является JSON: {e}"))
            }
        })
    }
}
