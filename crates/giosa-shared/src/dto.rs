//! Data Transfer Objects - request/response types for the HTTP surface.

use serde::{Deserialize, Serialize};

/// Submitted post form. Checkboxes are absent when unchecked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub published: Option<Checkbox>,
}

impl PostForm {
    pub fn is_published(&self) -> bool {
        self.published.as_ref().is_some_and(Checkbox::is_checked)
    }
}

/// A checkbox as sent by an HTML form (`"on"`, `"1"`) or a JSON body (`true`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Checkbox {
    Bool(bool),
    Text(String),
}

impl Checkbox {
    pub fn is_checked(&self) -> bool {
        match self {
            Checkbox::Bool(checked) => *checked,
            Checkbox::Text(value) => matches!(value.as_str(), "1" | "true" | "on" | "yes"),
        }
    }
}

/// Submitted comment form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub content: String,
}

/// Query string of the post index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexQuery {
    pub search: Option<String>,
}

/// Public representation of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub likes: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Public representation of a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: String,
}

/// A post together with its comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// Authoritative like count returned to the like button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub id: String,
    pub likes: i32,
}
