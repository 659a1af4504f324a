//! Landing page.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use askama::Template;

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{HomePage, ViewContext};

use super::html;

const RECENT_POSTS: u64 = 5;

/// GET /
pub async fn index(state: web::Data<AppState>, ctx: ViewContext) -> AppResult<HttpResponse> {
    let posts = state.posts.recent_published(RECENT_POSTS).await?;
    let total = state.posts.count().await?;

    let page = HomePage { ctx, posts, total };
    Ok(html(StatusCode::OK, page.render()?))
}
