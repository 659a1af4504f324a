use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. `RepoError::NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// `delete` must also remove the post's comments.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Newest first. `search` is matched case-insensitively against
    /// title or content; `None` returns everything.
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError>;

    /// Newest published posts, at most `limit`.
    async fn list_published(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Atomically add one like and return the stored post.
    async fn increment_likes(&self, id: Uuid) -> Result<Post, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments of a post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}
