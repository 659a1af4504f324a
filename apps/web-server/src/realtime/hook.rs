use askama::Template;

use giosa_core::domain::{CommitEvent, OutboundMessage, Topic};
use giosa_core::ports::CommitHook;
use giosa_shared::StreamFragment;
use giosa_shared::stream::render_all;

use crate::views::{CommentsCountPartial, CommentsListPartial, PostCardPartial, ViewContext};

/// Renders stream fragments for committed mutations.
///
/// Comment changes go to `post_<id>_comments` as the full list plus
/// the count badge; post edits go to `post_<id>` as the re-rendered
/// card. A fragment that fails to render is logged and left out.
#[derive(Debug, Default)]
pub struct FragmentHook {
    ctx: ViewContext,
}

impl FragmentHook {
    pub fn new() -> Self {
        Self {
            ctx: ViewContext::broadcast(),
        }
    }

    fn render(&self, template: &impl Template, target: &str) -> Option<String> {
        match template.render() {
            Ok(html) => Some(html),
            Err(e) => {
                tracing::error!(target = %target, error = %e, "Broadcast fragment failed to render");
                None
            }
        }
    }
}

pub fn comments_target(post_id: impl std::fmt::Display) -> String {
    format!("post_{}_comments", post_id)
}

pub fn comments_count_target(post_id: impl std::fmt::Display) -> String {
    format!("comments_count_{}", post_id)
}

impl CommitHook for FragmentHook {
    fn after_commit(&self, event: &CommitEvent<'_>) -> Vec<OutboundMessage> {
        match *event {
            CommitEvent::CommentsChanged { post, comments, .. } => {
                let list_target = comments_target(post.id);
                let count_target = comments_count_target(post.id);

                let list = CommentsListPartial {
                    ctx: &self.ctx,
                    post,
                    comments,
                };
                let count = CommentsCountPartial {
                    ctx: &self.ctx,
                    post,
                    count: comments.len(),
                };

                let mut fragments = Vec::with_capacity(2);
                if let Some(html) = self.render(&list, &list_target) {
                    fragments.push(StreamFragment::replace(list_target, html));
                }
                if let Some(html) = self.render(&count, &count_target) {
                    fragments.push(StreamFragment::replace(count_target, html));
                }
                if fragments.is_empty() {
                    return Vec::new();
                }

                vec![OutboundMessage::new(
                    Topic::PostComments(post.id),
                    render_all(&fragments),
                )]
            }
            CommitEvent::PostUpdated { post } => {
                let target = format!("post_{}", post.id);
                let card = PostCardPartial {
                    ctx: self.ctx.clone(),
                    post: post.clone(),
                };

                self.render(&card, &target)
                    .map(|html| {
                        OutboundMessage::new(
                            Topic::Post(post.id),
                            StreamFragment::replace(target, html).render(),
                        )
                    })
                    .into_iter()
                    .collect()
            }
        }
    }
}
