//! Post use cases.

use std::sync::Arc;

use uuid::Uuid;

use super::{Broadcaster, normalize_search};
use crate::domain::{CommitEvent, Post, PostDraft};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Post service - CRUD, search and likes.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    broadcaster: Broadcaster,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, broadcaster: Broadcaster) -> Self {
        Self { posts, broadcaster }
    }

    /// Newest first, optionally filtered by a search term.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, DomainError> {
        let term = normalize_search(search);
        tracing::debug!(search = ?term, "Listing posts");
        Ok(self.posts.list(term).await?)
    }

    pub async fn recent_published(&self, limit: u64) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list_published(limit).await?)
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.posts.count().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create(&self, draft: PostDraft) -> Result<Post, DomainError> {
        let post = Post::new(draft);
        post.validate()?;

        let saved = self.posts.create(post).await?;
        tracing::info!(post_id = %saved.id, published = saved.published, "Post created");
        Ok(saved)
    }

    /// Apply the draft and notify live viewers of the post.
    pub async fn update(&self, id: Uuid, draft: PostDraft) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;
        post.apply(draft);
        post.validate()?;

        let saved = self
            .posts
            .update(post)
            .await
            .map_err(|e| not_found_as_post(e, id))?;
        tracing::info!(post_id = %saved.id, "Post updated");

        self.broadcaster
            .dispatch(CommitEvent::PostUpdated { post: &saved })
            .await;
        Ok(saved)
    }

    /// Delete the post and its comments, returning what was removed.
    pub async fn delete(&self, id: Uuid) -> Result<Post, DomainError> {
        let post = self.get(id).await?;
        self.posts
            .delete(id)
            .await
            .map_err(|e| not_found_as_post(e, id))?;

        tracing::info!(post_id = %id, title = %post.title, "Post deleted");
        Ok(post)
    }

    pub async fn like(&self, id: Uuid) -> Result<Post, DomainError> {
        let post = self
            .posts
            .increment_likes(id)
            .await
            .map_err(|e| not_found_as_post(e, id))?;

        tracing::debug!(post_id = %id, likes = post.likes, "Post liked");
        Ok(post)
    }
}

fn not_found_as_post(err: RepoError, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => other.into(),
    }
}
