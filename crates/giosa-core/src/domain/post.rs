use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{Field, ValidationErrors};

pub const TITLE_MIN_LENGTH: usize = 5;
pub const CONTENT_MIN_LENGTH: usize = 10;

/// Post entity - a blog entry, either published or a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-editable attributes of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub published: bool,
}

impl Post {
    /// Create a new post with no likes.
    pub fn new(draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            published: draft.published,
            likes: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn is_draft(&self) -> bool {
        !self.is_published()
    }

    /// Only published posts take comments.
    pub fn allows_comments(&self) -> bool {
        self.is_published()
    }

    /// Replace the editable attributes and bump `updated_at`.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.content = draft.content;
        self.published = draft.published;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_text(Field::Title, &self.title, TITLE_MIN_LENGTH);
        errors.check_text(Field::Content, &self.content, CONTENT_MIN_LENGTH);
        errors.into_result()
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}
