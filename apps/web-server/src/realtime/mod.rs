//! Live updates: the commit hook that renders fragments, and the SSE
//! feed that carries them to browsers.

mod feed;
mod hook;

pub use feed::LiveFeed;
pub use hook::{FragmentHook, comments_count_target, comments_target};
