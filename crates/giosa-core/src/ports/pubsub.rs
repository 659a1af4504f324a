//! Pub/Sub port - abstraction over pub/sub backends.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

/// Message received from a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubSubMessage {
    pub channel: String,
    pub payload: String,
}

/// Handler for incoming messages.
pub type MessageHandler =
    Box<dyn Fn(PubSubMessage) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Handle identifying one subscriber on one channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub channel: String,
    pub id: Uuid,
}

impl Subscription {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            id: Uuid::new_v4(),
        }
    }
}

/// Pub/Sub trait - abstraction over pub/sub backends.
///
/// Delivery is best-effort: a subscriber that is not connected when a
/// message is published never sees it.
#[async_trait]
pub trait PubSub: Send + Sync {
    /// Publish a message to a channel.
    async fn publish(&self, channel: &str, message: &str) -> Result<(), PubSubError>;

    /// Subscribe to a channel with a handler.
    async fn subscribe(
        &self,
        channel: &str,
        handler: MessageHandler,
    ) -> Result<Subscription, PubSubError>;

    /// Stop delivering to one subscriber. Other subscribers of the
    /// channel are unaffected.
    async fn unsubscribe(&self, subscription: &Subscription) -> Result<(), PubSubError>;
}

/// Pub/Sub errors.
#[derive(Debug, thiserror::Error)]
pub enum PubSubError {
    #[error("Failed to publish: {0}")]
    PublishError(String),

    #[error("Failed to subscribe: {0}")]
    SubscribeError(String),

    #[error("Connection error: {0}")]
    Connection(String),
}
