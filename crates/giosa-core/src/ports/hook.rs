//! Post-commit hook port.

use crate::domain::{CommitEvent, OutboundMessage};

/// Turns a committed mutation into messages for live subscribers.
///
/// Implemented by the presentation layer, which knows how to render
/// the affected fragments.
pub trait CommitHook: Send + Sync {
    fn after_commit(&self, event: &CommitEvent<'_>) -> Vec<OutboundMessage>;
}
