//! Services wired to the in-memory store and pub/sub.

use std::sync::Arc;
use std::time::Duration;

use giosa_core::DomainError;
use giosa_core::domain::{CommentDraft, CommitEvent, OutboundMessage, PostDraft, Topic};
use giosa_core::ports::{CommitHook, MessageHandler, PubSub};
use giosa_core::services::{Broadcaster, CommentService, PostService};
use giosa_infra::{InMemoryPubSub, InMemoryStore};
use tokio::sync::mpsc;

/// Publishes a short plain-text summary per topic.
struct SummaryHook;

impl CommitHook for SummaryHook {
    fn after_commit(&self, event: &CommitEvent<'_>) -> Vec<OutboundMessage> {
        match event {
            CommitEvent::CommentsChanged { post, comments, .. } => vec![OutboundMessage::new(
                Topic::PostComments(post.id),
                format!("comments={}", comments.len()),
            )],
            CommitEvent::PostUpdated { post } => vec![OutboundMessage::new(
                Topic::Post(post.id),
                format!("title={}", post.title),
            )],
        }
    }
}

struct Harness {
    posts: PostService,
    comments: CommentService,
    pubsub: Arc<InMemoryPubSub>,
}

fn harness() -> Harness {
    let store = InMemoryStore::new();
    let pubsub = Arc::new(InMemoryPubSub::default());
    let broadcaster = Broadcaster::new(pubsub.clone(), Arc::new(SummaryHook));

    Harness {
        posts: PostService::new(Arc::new(store.clone()), broadcaster.clone()),
        comments: CommentService::new(Arc::new(store.clone()), Arc::new(store), broadcaster),
        pubsub,
    }
}

fn collect(tx: mpsc::Sender<String>) -> MessageHandler {
    Box::new(move |msg| {
        let tx = tx.clone();
        Box::pin(async move {
            let _ = tx.send(msg.payload).await;
        })
    })
}

fn post_draft(published: bool) -> PostDraft {
    PostDraft {
        title: "Live updates".to_string(),
        content: "Streaming comments to readers".to_string(),
        published,
    }
}

fn comment_draft() -> CommentDraft {
    CommentDraft {
        author_name: "Lucia".to_string(),
        content: "Works nicely".to_string(),
    }
}

#[tokio::test]
async fn test_comment_is_broadcast_to_post_topic() {
    let h = harness();
    let post = h.posts.create(post_draft(true)).await.unwrap();

    let (tx, mut rx) = mpsc::channel(4);
    h.pubsub
        .subscribe(&Topic::PostComments(post.id).channel(), collect(tx))
        .await
        .unwrap();

    let outcome = h.comments.create(post.id, comment_draft()).await.unwrap();
    assert_eq!(outcome.count(), 1);

    let payload = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap();
    assert_eq!(payload.as_deref(), Some("comments=1"));

    h.comments
        .destroy(post.id, outcome.comment.id)
        .await
        .unwrap();
    let payload = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap();
    assert_eq!(payload.as_deref(), Some("comments=0"));
}

#[tokio::test]
async fn test_draft_post_refuses_comments_without_broadcast() {
    let h = harness();
    let draft = h.posts.create(post_draft(false)).await.unwrap();

    let result = h.comments.create(draft.id, comment_draft()).await;
    assert!(matches!(result, Err(DomainError::CommentsClosed { .. })));
    assert!(h.comments.for_post(draft.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_broadcasts_post_topic() {
    let h = harness();
    let post = h.posts.create(post_draft(true)).await.unwrap();

    let (tx, mut rx) = mpsc::channel(4);
    h.pubsub
        .subscribe(&Topic::Post(post.id).channel(), collect(tx))
        .await
        .unwrap();

    let mut draft = post_draft(true);
    draft.title = "Renamed post".to_string();
    h.posts.update(post.id, draft).await.unwrap();

    let payload = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap();
    assert_eq!(payload.as_deref(), Some("title=Renamed post"));
}

#[tokio::test]
async fn test_invalid_update_leaves_post_untouched() {
    let h = harness();
    let post = h.posts.create(post_draft(true)).await.unwrap();

    let mut draft = post_draft(true);
    draft.title = String::new();
    let result = h.posts.update(post.id, draft).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(h.posts.get(post.id).await.unwrap().title, "Live updates");
}

#[tokio::test]
async fn test_delete_post_takes_comments_along() {
    let h = harness();
    let post = h.posts.create(post_draft(true)).await.unwrap();
    h.comments.create(post.id, comment_draft()).await.unwrap();

    h.posts.delete(post.id).await.unwrap();
    assert!(h.comments.for_post(post.id).await.unwrap().is_empty());
    assert!(matches!(
        h.posts.get(post.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_likes_accumulate() {
    let h = harness();
    let post = h.posts.create(post_draft(true)).await.unwrap();

    for _ in 0..3 {
        h.posts.like(post.id).await.unwrap();
    }
    assert_eq!(h.posts.get(post.id).await.unwrap().likes, 3);
}

#[tokio::test]
async fn test_like_on_a_liked_post_adds_exactly_one() {
    let h = harness();
    let post = h.posts.create(post_draft(true)).await.unwrap();
    for _ in 0..5 {
        h.posts.like(post.id).await.unwrap();
    }
    assert_eq!(h.posts.get(post.id).await.unwrap().likes, 5);

    let liked = h.posts.like(post.id).await.unwrap();
    assert_eq!(liked.likes, 6);
    assert_eq!(h.posts.get(post.id).await.unwrap().likes, 6);
}
