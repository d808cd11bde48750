use async_trait::async_trait;

/// Outbound message sent to a chat channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOutboundMessage {
    pub recipient: String,
    pub text: String,
}

/// Channel adapter contract. New chat transports only need to implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Stable channel identifier (e.g. `telegram`).
    fn id(&self) -> &'static str;

    /// Deliver a text message to the channel-specific recipient.
    async fn send(&self, message: ChannelOutboundMessage) -> anyhow::Result<()>;

    /// Best-effort health check.
    async fn health_check(&self) -> anyhow::Result<bool>;
}
