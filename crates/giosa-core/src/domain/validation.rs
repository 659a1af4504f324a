//! Field-level validation results shared by posts and comments.

use serde::{Deserialize, Serialize};

/// A validated attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Content,
    AuthorName,
    Post,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::AuthorName => "author_name",
            Field::Post => "post",
        }
    }
}

/// A single broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    Blank,
    TooShort { min: usize },
    /// The parent post is a draft and does not take comments.
    CommentsClosed,
}

/// Ordered collection of violations keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    entries: Vec<(Field, Violation)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, violation: Violation) {
        self.entries.push((field, violation));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Violations recorded against `field`, in insertion order.
    pub fn on(&self, field: Field) -> impl Iterator<Item = &Violation> {
        self.entries
            .iter()
            .filter(move |(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    pub fn has(&self, field: Field) -> bool {
        self.on(field).next().is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, Violation)> {
        self.entries.iter()
    }

    /// Presence plus minimum length, counted in characters.
    ///
    /// A blank value reports both `Blank` and `TooShort`.
    pub fn check_text(&mut self, field: Field, value: &str, min: usize) {
        if value.trim().is_empty() {
            self.add(field, Violation::Blank);
        }
        if value.chars().count() < min {
            self.add(field, Violation::TooShort { min });
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(field, violation)| match violation {
                Violation::Blank => format!("{} can't be blank", field.as_str()),
                Violation::TooShort { min } => {
                    format!("{} is too short (minimum is {} characters)", field.as_str(), min)
                }
                Violation::CommentsClosed => format!("{} does not accept comments", field.as_str()),
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
