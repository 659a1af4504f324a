//! HTTP handlers and route configuration.

mod assets;
mod comments;
mod health;
mod home;
mod live;
mod posts;
mod preferences;

#[cfg(test)]
mod tests;

use actix_web::http::{StatusCode, header};
use actix_web::{Either, HttpResponse, web};
use giosa_core::domain::{Comment, Post};
use giosa_shared::StreamFragment;
use giosa_shared::dto::{CommentResponse, PostResponse};
use giosa_shared::stream::{STREAM_CONTENT_TYPE, render_all};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home::index))
        .route("/up", web::get().to(health::health_check))
        .route("/assets/widgets.js", web::get().to(assets::widgets_js))
        // Preferences
        .route("/toggle_theme", web::post().to(preferences::toggle_theme))
        .route("/toggle_locale", web::post().to(preferences::toggle_locale))
        .route("/set_locale/{locale}", web::post().to(preferences::set_locale))
        // Posts
        .service(
            web::resource("/posts")
                .route(web::get().to(posts::index))
                .route(web::post().to(posts::create)),
        )
        .service(web::resource("/posts/new").route(web::get().to(posts::new_post)))
        .service(
            web::resource("/posts/{id}")
                .route(web::get().to(posts::show))
                .route(web::patch().to(posts::update))
                .route(web::put().to(posts::update))
                .route(web::delete().to(posts::destroy)),
        )
        .service(web::resource("/posts/{id}/edit").route(web::get().to(posts::edit)))
        .service(web::resource("/posts/{id}/like").route(web::patch().to(posts::like)))
        .service(web::resource("/posts/{id}/live").route(web::get().to(live::subscribe)))
        // Comments
        .service(
            web::resource("/posts/{post_id}/comments").route(web::post().to(comments::create)),
        )
        .service(
            web::resource("/posts/{post_id}/comments/{id}")
                .route(web::delete().to(comments::destroy)),
        );
}

pub(crate) fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

pub(crate) fn stream(status: StatusCode, fragments: &[StreamFragment]) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(STREAM_CONTENT_TYPE)
        .body(render_all(fragments))
}

/// 303 so the browser follows up with a GET.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Form-encoded from browsers, JSON from API clients.
pub(crate) type Submitted<T> = Either<web::Json<T>, web::Form<T>>;

pub(crate) fn submitted<T>(body: Submitted<T>) -> T {
    match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    }
}

pub(crate) fn post_json(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        content: post.content.clone(),
        published: post.published,
        likes: post.likes,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

pub(crate) fn comment_json(comment: &Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id.to_string(),
        post_id: comment.post_id.to_string(),
        author_name: comment.author_name.clone(),
        content: comment.content.clone(),
        created_at: comment.created_at.to_rfc3339(),
    }
}
