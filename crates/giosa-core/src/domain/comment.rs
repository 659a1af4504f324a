use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::post::Post;
use super::validation::{Field, ValidationErrors, Violation};

pub const AUTHOR_NAME_MIN_LENGTH: usize = 2;
pub const CONTENT_MIN_LENGTH: usize = 5;

/// Comment entity - a reader's reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submitted comment attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub author_name: String,
    pub content: String,
}

impl Comment {
    pub fn new(post_id: Uuid, draft: CommentDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_name: draft.author_name,
            content: draft.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate against the parent post.
    ///
    /// Commenting on a draft is reported on [`Field::Post`].
    pub fn validate(&self, post: &Post) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_text(Field::AuthorName, &self.author_name, AUTHOR_NAME_MIN_LENGTH);
        errors.check_text(Field::Content, &self.content, CONTENT_MIN_LENGTH);

        if post.id != self.post_id || !post.allows_comments() {
            errors.add(Field::Post, Violation::CommentsClosed);
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostDraft;

    fn post(published: bool) -> Post {
        Post::new(PostDraft {
            title: "Test Post".to_string(),
            content: "Test content".to_string(),
            published,
        })
    }

    fn comment_on(post: &Post, author: &str, content: &str) -> Comment {
        Comment::new(
            post.id,
            CommentDraft {
                author_name: author.to_string(),
                content: content.to_string(),
            },
        )
    }

    #[test]
    fn test_valid_comment_on_published_post() {
        let post = post(true);
        let comment = comment_on(&post, "Test Author", "Test comment content");
        assert!(comment.validate(&post).is_ok());
    }

    #[test]
    fn test_author_name_needs_two_characters() {
        let post = post(true);
        let errors = comment_on(&post, "A", "Test comment content")
            .validate(&post)
            .unwrap_err();
        assert!(errors.has(Field::AuthorName));
        assert!(!errors.has(Field::Content));
    }

    #[test]
    fn test_content_needs_five_characters() {
        let post = post(true);
        let errors = comment_on(&post, "Test Author", "Hi")
            .validate(&post)
            .unwrap_err();
        assert!(errors.has(Field::Content));
    }

    #[test]
    fn test_draft_post_rejects_comment_on_post_field() {
        let draft = post(false);
        let errors = comment_on(&draft, "Test Author", "Test comment content")
            .validate(&draft)
            .unwrap_err();

        let on_post: Vec<_> = errors.on(Field::Post).collect();
        assert_eq!(on_post, vec![&Violation::CommentsClosed]);
    }
}
