use crate::channels::traits::{ChannelAdapter, ChannelOutboundMessage};
use crate::config::{BotConfig, Credentials};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Telegram adapter using the Bot HTTP API.
pub struct TelegramAdapter {
    bot_token: String,
    api_url: String,
    client: reqwest::Client,
}

impl TelegramAdapter {
    /// Create an adapter against `api_url` (normally `https://api.telegram.org`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        bot_token: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            bot_token: bot_token.into(),
            api_url: api_url.into(),
            client,
        })
    }

    /// Create an adapter from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &BotConfig, credentials: &Credentials) -> anyhow::Result<Self> {
        Self::new(
            credentials.telegram_token.clone(),
            config.telegram_api_url.clone(),
            config.request_timeout(),
        )
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_url.trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait]
impl ChannelAdapter for TelegramAdapter {
    fn id(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, message: ChannelOutboundMessage) -> anyhow::Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("telegram bot token is empty");
        }

        let body = json!({
            "chat_id": message.recipient,
            "text": message.text
        });
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("telegram send failed ({status}): {body}");
        }

        // The Bot API reports logical failures as {"ok": false, "description": ...}.
        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;
        let ok = payload
            .get("ok")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        if !ok {
            let description = payload
                .get("description")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("no description");
            anyhow::bail!("telegram rejected message: {description}");
        }
        Ok(())
    }

    async fn health_check(&self) -> anyhow::Result<bool> {
        if self.bot_token.trim().is_empty() {
            return Ok(false);
        }
        let response = self
            .client
            .get(self.method_url("getMe"))
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        Ok(response.status().is_success())
    }
}
