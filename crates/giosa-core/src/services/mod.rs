//! Application services - orchestrate repositories and broadcasts.

mod broadcaster;
mod comments;
mod posts;

pub use broadcaster::Broadcaster;
pub use comments::{CommentOutcome, CommentService};
pub use posts::PostService;

/// Trim a search term; blank terms mean "no filter".
pub fn normalize_search(search: Option<&str>) -> Option<&str> {
    search.map(str::trim).filter(|term| !term.is_empty())
}
