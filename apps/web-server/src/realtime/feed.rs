use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use actix_web::web::Bytes;
use futures::Stream;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, interval_at};

use giosa_core::ports::{MessageHandler, PubSub, PubSubError, PubSubMessage, Subscription};

const KEEPALIVE: &[u8] = b": keep-alive\n\n";

/// Server-Sent Events body for one browser.
///
/// Each pub/sub message becomes one default-typed SSE event whose data
/// is the stream markup. Dropping the feed unsubscribes.
pub struct LiveFeed {
    rx: mpsc::Receiver<PubSubMessage>,
    keepalive: Interval,
    pubsub: Arc<dyn PubSub>,
    subscriptions: Vec<Subscription>,
}

fn forward(tx: mpsc::Sender<PubSubMessage>) -> MessageHandler {
    Box::new(move |msg| {
        let tx = tx.clone();
        Box::pin(async move {
            if tx.send(msg).await.is_err() {
                tracing::debug!("Live feed gone; dropping message");
            }
        })
    })
}

impl LiveFeed {
    /// Subscribe to every channel. On failure, channels already
    /// subscribed are released when the partial feed drops.
    pub async fn open(
        pubsub: Arc<dyn PubSub>,
        channels: &[String],
        keepalive: Duration,
    ) -> Result<Self, PubSubError> {
        let (tx, rx) = mpsc::channel(32);
        let mut feed = Self {
            rx,
            keepalive: interval_at(Instant::now() + keepalive, keepalive),
            pubsub: pubsub.clone(),
            subscriptions: Vec::with_capacity(channels.len()),
        };

        for channel in channels {
            let subscription = pubsub.subscribe(channel, forward(tx.clone())).await?;
            feed.subscriptions.push(subscription);
        }

        tracing::info!(channels = ?channels, "Live feed opened");
        Ok(feed)
    }
}

/// One SSE event: a `data:` line per payload line.
pub fn sse_event(payload: &str) -> String {
    let mut event = String::with_capacity(payload.len() + 16);
    for line in payload.lines() {
        event.push_str("data: ");
        event.push_str(line);
        event.push('\n');
    }
    event.push('\n');
    event
}

impl Stream for LiveFeed {
    type Item = Result<Bytes, actix_web::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Poll::Ready(message) = this.rx.poll_recv(cx) {
            return Poll::Ready(message.map(|m| Ok(Bytes::from(sse_event(&m.payload)))));
        }

        if this.keepalive.poll_tick(cx).is_ready() {
            return Poll::Ready(Some(Ok(Bytes::from_static(KEEPALIVE))));
        }

        Poll::Pending
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        let subscriptions = std::mem::take(&mut self.subscriptions);
        if subscriptions.is_empty() {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let pubsub = self.pubsub.clone();
        runtime.spawn(async move {
            for subscription in &subscriptions {
                if let Err(e) = pubsub.unsubscribe(subscription).await {
                    tracing::warn!(channel = %subscription.channel, error = %e, "Unsubscribe failed");
                }
            }
            tracing::info!("Live feed closed");
        });
    }
}
