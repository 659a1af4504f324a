//! Domain entities - the core business objects.

mod broadcast;
mod comment;
mod post;
mod validation;

pub use broadcast::{CommentChange, CommitEvent, OutboundMessage, Topic};
pub use comment::{Comment, CommentDraft};
pub use post::{Post, PostDraft};
pub use validation::{Field, ValidationErrors, Violation};
