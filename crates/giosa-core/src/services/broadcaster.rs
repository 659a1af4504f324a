//! Publishes the output of the commit hook.

use std::sync::Arc;

use crate::domain::CommitEvent;
use crate::ports::{CommitHook, PubSub};

/// Fire-and-forget fan-out of committed mutations.
///
/// Publish failures are logged and dropped; nothing is retried.
#[derive(Clone)]
pub struct Broadcaster {
    pubsub: Arc<dyn PubSub>,
    hook: Arc<dyn CommitHook>,
}

impl Broadcaster {
    pub fn new(pubsub: Arc<dyn PubSub>, hook: Arc<dyn CommitHook>) -> Self {
        Self { pubsub, hook }
    }

    /// Returns how many messages reached the backend.
    pub async fn dispatch(&self, event: CommitEvent<'_>) -> usize {
        let messages = self.hook.after_commit(&event);
        let mut published = 0;

        for message in messages {
            let channel = message.topic.channel();
            match self.pubsub.publish(&channel, &message.payload).await {
                Ok(()) => {
                    published += 1;
                    tracing::debug!(channel = %channel, "Broadcast published");
                }
                Err(e) => {
                    tracing::warn!(channel = %channel, error = %e, "Broadcast dropped");
                }
            }
        }

        published
    }
}
