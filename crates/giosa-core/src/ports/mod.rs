//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure and presentation must implement.

mod hook;
mod pubsub;
mod repository;

pub use hook::CommitHook;
pub use pubsub::{MessageHandler, PubSub, PubSubError, PubSubMessage, Subscription};
pub use repository::{BaseRepository, CommentRepository, PostRepository};
