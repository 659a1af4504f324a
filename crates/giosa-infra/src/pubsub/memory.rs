//! In-memory pub/sub implementation.
//!
//! This is a fallback when Redis is not available.
//! Works within a single process only.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use uuid::Uuid;

use giosa_core::ports::{MessageHandler, PubSub, PubSubError, PubSubMessage, Subscription};

struct Channel {
    sender: broadcast::Sender<String>,
    listeners: HashMap<Uuid, JoinHandle<()>>,
}

/// In-memory pub/sub system.
pub struct InMemoryPubSub {
    channels: Arc<RwLock<HashMap<String, Channel>>>,
    buffer_size: usize,
}

impl InMemoryPubSub {
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            buffer_size,
        }
    }

    /// Number of live subscribers on a channel.
    pub async fn subscriber_count(&self, channel: &str) -> usize {
        self.channels
            .read()
            .await
            .get(channel)
            .map(|c| c.listeners.len())
            .unwrap_or(0)
    }
}

impl Default for InMemoryPubSub {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl PubSub for InMemoryPubSub {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), PubSubError> {
        let channels = self.channels.read().await;

        if let Some(entry) = channels.get(channel) {
            // Ignore send errors (no subscribers)
            let _ = entry.sender.send(message.to_string());
            tracing::debug!(channel = %channel, "Message published");
        } else {
            tracing::debug!(channel = %channel, "No subscribers for channel");
        }

        Ok(())
    }

    async fn subscribe(
        &self,
        channel: &str,
        handler: MessageHandler,
    ) -> Result<Subscription, PubSubError> {
        let mut channels = self.channels.write().await;

        let entry = channels
            .entry(channel.to_string())
            .or_insert_with(|| Channel {
                sender: broadcast::channel(self.buffer_size).0,
                listeners: HashMap::new(),
            });

        let mut receiver = entry.sender.subscribe();
        let subscription = Subscription::new(channel);
        let channel_name = channel.to_string();

        let handle = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(payload) => {
                        let msg = PubSubMessage {
                            channel: channel_name.clone(),
                            payload,
                        };
                        handler(msg).await;
                    }
                    Err(broadcast::error::RecvError::Lagged(count)) => {
                        tracing::warn!(
                            channel = %channel_name,
                            lagged = count,
                            "Subscriber lagged behind"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!(channel = %channel_name, "Channel closed");
                        break;
                    }
                }
            }
        });

        entry.listeners.insert(subscription.id, handle);
        tracing::debug!(channel = %channel, subscription = %subscription.id, "Subscribed to channel");

        Ok(subscription)
    }

    async fn unsubscribe(&self, subscription: &Subscription) -> Result<(), PubSubError> {
        let mut channels = self.channels.write().await;

        let Some(entry) = channels.get_mut(&subscription.channel) else {
            return Ok(());
        };

        if let Some(handle) = entry.listeners.remove(&subscription.id) {
            handle.abort();
        }
        if entry.listeners.is_empty() {
            channels.remove(&subscription.channel);
        }

        tracing::debug!(
            channel = %subscription.channel,
            subscription = %subscription.id,
            "Unsubscribed from channel"
        );
        Ok(())
    }
}
