//! Commit events and the outbound messages they fan out to.

use std::fmt;

use uuid::Uuid;

use super::comment::Comment;
use super::post::Post;

/// A pub/sub topic scoped to a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Post card updates.
    Post(Uuid),
    /// Comment list and counter updates.
    PostComments(Uuid),
}

impl Topic {
    /// Channel name used on the pub/sub backend.
    pub fn channel(&self) -> String {
        match self {
            Topic::Post(id) => format!("post_{}", id),
            Topic::PostComments(id) => format!("post_{}_comments", id),
        }
    }

    /// Every topic a live view of `post_id` listens to.
    pub fn for_post(post_id: Uuid) -> [Topic; 2] {
        [Topic::Post(post_id), Topic::PostComments(post_id)]
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.channel())
    }
}

/// What happened to a comment.
#[derive(Debug, Clone, Copy)]
pub enum CommentChange<'a> {
    Created(&'a Comment),
    Destroyed(&'a Comment),
}

impl<'a> CommentChange<'a> {
    pub fn comment(&self) -> &'a Comment {
        match self {
            CommentChange::Created(c) | CommentChange::Destroyed(c) => *c,
        }
    }
}

/// A committed mutation, carrying the state needed to re-render.
#[derive(Debug, Clone, Copy)]
pub enum CommitEvent<'a> {
    /// `comments` is the parent's full collection after the commit.
    CommentsChanged {
        post: &'a Post,
        comments: &'a [Comment],
        change: CommentChange<'a>,
    },
    PostUpdated { post: &'a Post },
}

impl CommitEvent<'_> {
    pub fn post(&self) -> &Post {
        match self {
            CommitEvent::CommentsChanged { post, .. } | CommitEvent::PostUpdated { post } => *post,
        }
    }
}

/// A payload addressed to one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub topic: Topic,
    pub payload: String,
}

impl OutboundMessage {
    pub fn new(topic: Topic, payload: impl Into<String>) -> Self {
        Self {
            topic,
            payload: payload.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names_are_scoped_by_post() {
        let id = Uuid::nil();
        assert_eq!(
            Topic::Post(id).channel(),
            "post_00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            Topic::PostComments(id).to_string(),
            "post_00000000-0000-0000-0000-000000000000_comments"
        );
    }
}
