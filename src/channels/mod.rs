//! Chat notification channels.
//!
//! Adapters implement [`ChannelAdapter`]; the [`Notifier`] binds one adapter
//! to the configured recipient and owns delivery logging.

pub mod telegram;
pub mod traits;

use crate::channels::traits::{ChannelAdapter, ChannelOutboundMessage};
use crate::error::{BotError, Result};
use std::sync::Arc;

/// Sends notification text to a single recipient.
#[derive(Clone)]
pub struct Notifier {
    adapter: Arc<dyn ChannelAdapter>,
    recipient: String,
}

impl Notifier {
    pub fn new(adapter: Arc<dyn ChannelAdapter>, recipient: impl Into<String>) -> Self {
        Self {
            adapter,
            recipient: recipient.into(),
        }
    }

    /// Deliver `text` to the recipient.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::DeliveryFailed`] if the adapter fails; the failure
    /// is logged before it is returned.
    pub async fn notify(&self, text: &str) -> Result<()> {
        let message = ChannelOutboundMessage {
            recipient: self.recipient.clone(),
            text: text.to_owned(),
        };
        match self.adapter.send(message).await {
            Ok(()) => {
                tracing::debug!(
                    channel = self.adapter.id(),
                    "Удачная отправка сообщения в Telegram"
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!(
                    channel = self.adapter.id(),
                    error = %err,
                    "Сбой при отправке сообщения в Telegram"
                );
                Err(BotError::DeliveryFailed(format!("{err:#}")))
            }
        }
    }

    /// Best-effort adapter health check; errors count as unhealthy.
    pub async fn is_healthy(&self) -> bool {
        match self.adapter.health_check().await {
            Ok(healthy) => healthy,
            Err(err) => {
                tracing::warn!(channel = self.adapter.id(), "health check failed: {err}");
                false
            }
        }
    }
}
