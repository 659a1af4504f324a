//! Redis PubSub implementation.
//!
//! Lets several server instances share live updates.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

use giosa_core::ports::{MessageHandler, PubSub, PubSubError, PubSubMessage, Subscription};

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    pub connect_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Redis-backed PubSub implementation.
///
/// Every subscriber holds its own pubsub connection so one can be torn
/// down without touching the others.
pub struct RedisPubSub {
    conn: ConnectionManager,
    client: Client,
    subscriptions: Arc<RwLock<HashMap<Uuid, JoinHandle<()>>>>,
}

impl RedisPubSub {
    pub async fn new(config: RedisConfig) -> Result<Self, PubSubError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| PubSubError::Connection(e.to_string()))?;

        // Use timeout to prevent hanging if Redis is unreachable
        let conn_manager_fut = ConnectionManager::new(client.clone());
        let conn = tokio::time::timeout(config.connect_timeout, conn_manager_fut)
            .await
            .map_err(|_| PubSubError::Connection("Connection timed out".to_string()))?
            .map_err(|e| PubSubError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis PubSub");

        Ok(Self {
            conn,
            client,
            subscriptions: Arc::new(RwLock::new(HashMap::new())),
        })
    }
}

#[async_trait]
impl PubSub for RedisPubSub {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), PubSubError> {
        let mut conn = self.conn.clone();
        conn.publish::<_, _, ()>(channel, message)
            .await
            .map_err(|e| PubSubError::PublishError(e.to_string()))?;
        Ok(())
    }

    async fn subscribe(
        &self,
        channel: &str,
        handler: MessageHandler,
    ) -> Result<Subscription, PubSubError> {
        // Subscribe before returning so nothing published afterwards is missed.
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| PubSubError::Connection(e.to_string()))?;
        pubsub
            .subscribe(channel)
            .await
            .map_err(|e| PubSubError::SubscribeError(e.to_string()))?;

        let subscription = Subscription::new(channel);
        let channel_name = channel.to_string();

        let handle = tokio::spawn(async move {
            tracing::debug!(channel = %channel_name, "Subscribed to Redis channel");

            let mut stream = pubsub.on_message();
            while let Some(msg) = stream.next().await {
                let payload: String = match msg.get_payload() {
                    Ok(p) => p,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to get message payload");
                        continue;
                    }
                };

                let channel: String = msg.get_channel_name().to_string();
                handler(PubSubMessage { channel, payload }).await;
            }

            tracing::info!(channel = %channel_name, "PubSub connection closed");
        });

        self.subscriptions
            .write()
            .await
            .insert(subscription.id, handle);

        Ok(subscription)
    }

    async fn unsubscribe(&self, subscription: &Subscription) -> Result<(), PubSubError> {
        if let Some(handle) = self.subscriptions.write().await.remove(&subscription.id) {
            handle.abort();
            tracing::debug!(channel = %subscription.channel, "Unsubscribed from Redis channel");
        }
        Ok(())
    }
}
