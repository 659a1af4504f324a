//! Server-Sent Events feed of a post's live updates.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use giosa_core::domain::Topic;

use crate::middleware::error::{AppError, AppResult};
use crate::realtime::LiveFeed;
use crate::state::AppState;

/// GET /posts/{id}/live
///
/// Streams card and comment updates for one post until the client
/// disconnects.
pub async fn subscribe(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    let channels: Vec<String> = Topic::for_post(post.id)
        .iter()
        .map(Topic::channel)
        .collect();

    let feed = LiveFeed::open(state.pubsub.clone(), &channels, state.live_keepalive)
        .await
        .map_err(|e| AppError::Internal(format!("Live feed unavailable: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .insert_header(("X-Accel-Buffering", "no"))
        .streaming(feed))
}
