//! In-memory repository implementation.
//!
//! Used when no database is configured and in tests.
//! State lives in the process and is lost on restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use giosa_core::domain::{Comment, Post};
use giosa_core::error::RepoError;
use giosa_core::ports::{BaseRepository, CommentRepository, PostRepository};

#[derive(Debug, Default)]
struct Tables {
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

/// Posts and comments held behind one lock.
///
/// Serves as both [`PostRepository`] and [`CommentRepository`]; clones
/// share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, entity: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.posts.iter().any(|p| p.id == entity.id) {
            return Err(RepoError::Constraint("Post already exists".to_string()));
        }
        tables.posts.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .posts
            .iter_mut()
            .find(|p| p.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Err(RepoError::NotFound);
        }
        tables.comments.retain(|c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list(&self, search: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let posts = match search {
            Some(term) => {
                let needle = term.to_lowercase();
                tables
                    .posts
                    .iter()
                    .filter(|p| p.matches(&needle))
                    .cloned()
                    .collect()
            }
            None => tables.posts.clone(),
        };
        Ok(newest_first(posts))
    }

    async fn list_published(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let published = tables
            .posts
            .iter()
            .filter(|p| p.is_published())
            .cloned()
            .collect();
        Ok(newest_first(published)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn increment_likes(&self, id: Uuid) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.likes += 1;
        Ok(post.clone())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.tables.read().await.posts.len() as u64)
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, entity: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.iter().any(|p| p.id == entity.post_id) {
            return Err(RepoError::Constraint(format!(
                "Post {} does not exist",
                entity.post_id
            )));
        }
        tables.comments.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .comments
            .iter_mut()
            .find(|c| c.id == entity.id)
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        if tables.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().filter(|c| c.post_id == post_id).count() as u64)
    }
}
