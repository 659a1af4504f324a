//! Comment use cases, including the post-commit broadcast.

use std::sync::Arc;

use uuid::Uuid;

use super::Broadcaster;
use crate::domain::{Comment, CommentChange, CommentDraft, CommitEvent, Post, Topic};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, PostRepository};

/// Result of a comment mutation: the comment plus the parent's
/// collection as it stands after the commit.
#[derive(Debug, Clone)]
pub struct CommentOutcome {
    pub post: Post,
    pub comment: Comment,
    pub comments: Vec<Comment>,
}

impl CommentOutcome {
    pub fn count(&self) -> usize {
        self.comments.len()
    }
}

/// Comment service.
#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    broadcaster: Broadcaster,
}

impl CommentService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        broadcaster: Broadcaster,
    ) -> Self {
        Self {
            posts,
            comments,
            broadcaster,
        }
    }

    pub async fn for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.list_for_post(post_id).await?)
    }

    /// Add a comment to a published post.
    ///
    /// Drafts are refused with [`DomainError::CommentsClosed`] before the
    /// comment is validated.
    pub async fn create(
        &self,
        post_id: Uuid,
        draft: CommentDraft,
    ) -> Result<CommentOutcome, DomainError> {
        let post = self.find_post(post_id).await?;
        if !post.allows_comments() {
            tracing::info!(post_id = %post_id, "Comment refused on draft post");
            return Err(DomainError::CommentsClosed { post_id });
        }

        let comment = Comment::new(post.id, draft);
        comment.validate(&post)?;
        let comment = self.comments.create(comment).await?;
        let comments = self.comments.list_for_post(post.id).await?;

        tracing::info!(
            comment_id = %comment.id,
            channel = %Topic::PostComments(post.id),
            "Broadcasting new comment"
        );
        self.broadcaster
            .dispatch(CommitEvent::CommentsChanged {
                post: &post,
                comments: &comments,
                change: CommentChange::Created(&comment),
            })
            .await;

        Ok(CommentOutcome {
            post,
            comment,
            comments,
        })
    }

    /// Remove a comment that belongs to `post_id`.
    pub async fn destroy(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<CommentOutcome, DomainError> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post_id)
            .ok_or_else(|| DomainError::comment_not_found(comment_id))?;
        let post = self.find_post(post_id).await?;

        self.comments
            .delete(comment.id)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::comment_not_found(comment_id),
                other => other.into(),
            })?;
        let comments = self.comments.list_for_post(post.id).await?;

        tracing::info!(
            comment_id = %comment.id,
            channel = %Topic::PostComments(post.id),
            "Broadcasting comment removal"
        );
        self.broadcaster
            .dispatch(CommitEvent::CommentsChanged {
                post: &post,
                comments: &comments,
                change: CommentChange::Destroyed(&comment),
            })
            .await;

        Ok(CommentOutcome {
            post,
            comment,
            comments,
        })
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))
    }
}
