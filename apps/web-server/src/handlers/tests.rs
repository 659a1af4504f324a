use std::time::Duration;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use futures::StreamExt;
use uuid::Uuid;

use giosa_core::domain::{CommentDraft, Post, PostDraft, Topic};
use giosa_shared::dto::LikeResponse;
use giosa_shared::stream::STREAM_CONTENT_TYPE;

use super::configure_routes;
use crate::config::AppConfig;
use crate::middleware::method_override::MethodOverride;
use crate::realtime::LiveFeed;
use crate::state::AppState;

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::from(&[7; 64]))
                        .cookie_secure(false)
                        .build(),
                )
                .wrap(MethodOverride)
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

fn state() -> AppState {
    AppState::in_memory(&AppConfig::default())
}

async fn post(state: &AppState, title: &str, content: &str, published: bool) -> Post {
    state
        .posts
        .create(PostDraft {
            title: title.to_string(),
            content: content.to_string(),
            published,
        })
        .await
        .unwrap()
}

async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

fn session_cookie(resp: &actix_web::dev::ServiceResponse) -> Cookie<'static> {
    resp.response()
        .cookies()
        .next()
        .expect("session cookie")
        .into_owned()
}

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_health_reports_memory_store() {
    let state = state();
    let app = app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/up").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "memory");
}

#[actix_web::test]
async fn test_home_shows_recent_published_posts() {
    let state = state();
    post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    post(&state, "Borrador secreto", "Todavía no se publica", false).await;
    let app = app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("Bienvenido a GiosaApp"));
    assert!(html.contains("Manual de Rails"));
    assert!(!html.contains("Borrador secreto"));
}

#[actix_web::test]
async fn test_search_frame_returns_only_matching_list() {
    let state = state();
    post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    post(&state, "Tutorial JavaScript", "Aprende JavaScript desde cero", true).await;
    post(&state, "Ruby Guide", "Manual completo de Ruby", true).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/posts?search=manual&turbo_frame=posts_list")
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;

    assert!(html.contains(r#"<turbo-frame id="posts_list">"#));
    assert!(!html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Manual de Rails"));
    assert!(html.contains("Ruby Guide"));
    assert!(!html.contains("Tutorial JavaScript"));
}

#[actix_web::test]
async fn test_search_frame_name_is_percent_decoded() {
    let state = state();
    post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/posts?search=manual&turbo_frame=posts%5Flist")
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains(r#"<turbo-frame id="posts_list">"#));
    assert!(!html.contains("<!DOCTYPE html>"));
}

#[actix_web::test]
async fn test_encoded_method_override_deletes() {
    let state = state();
    let target = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}?%5Fmethod=DELETE", target.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(state.posts.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_search_without_matches_says_so() {
    let state = state();
    post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/posts?search=haskell")
        .insert_header(("Turbo-Frame", "posts_list"))
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("No se encontraron posts"));
}

#[actix_web::test]
async fn test_json_index_filters_and_blank_search_lists_all() {
    let state = state();
    post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    post(&state, "Tutorial JavaScript", "Aprende JavaScript desde cero", true).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/posts?search=MANUAL")
        .insert_header((header::ACCEPT, "application/json"))
        .to_request();
    let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/posts?search=%20%20")
        .insert_header((header::ACCEPT, "application/json"))
        .to_request();
    let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_create_rerenders_form_on_validation_failure() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_form([("title", "Hey"), ("content", "short")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_text(resp).await;
    assert!(html.contains("es demasiado corto"));
    assert_eq!(state.posts.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_create_redirects_with_flash() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_form([
            ("title", "Manual de Rails"),
            ("content", "Este es un contenido sobre Rails"),
            ("published", "1"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let created = state.posts.list(None).await.unwrap().remove(0);
    assert!(created.is_published());
    assert_eq!(location(&resp), format!("/posts/{}", created.id));

    let cookie = session_cookie(&resp);
    let req = test::TestRequest::get()
        .uri(location(&resp))
        .cookie(cookie)
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Post creado exitosamente"));
}

#[actix_web::test]
async fn test_create_json_accepts_boolean_published() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .insert_header((header::ACCEPT, "application/json"))
        .set_json(serde_json::json!({
            "title": "Manual de Rails",
            "content": "Este es un contenido sobre Rails",
            "published": true,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let json: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(json["published"], true);
    assert!(state.posts.list(None).await.unwrap()[0].is_published());
}

#[actix_web::test]
async fn test_update_through_method_override() {
    let state = state();
    let original = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", false).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}?_method=patch", original.id))
        .set_form([
            ("title", "Manual de Rails 8"),
            ("content", "Contenido revisado sobre Rails"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let updated = state.posts.get(original.id).await.unwrap();
    assert_eq!(updated.title, "Manual de Rails 8");
    assert!(updated.is_draft());
}

#[actix_web::test]
async fn test_unknown_post_is_not_found() {
    let state = state();
    let app = app!(state);

    for uri in [
        format!("/posts/{}", Uuid::new_v4()),
        format!("/posts/{}/edit", Uuid::new_v4()),
        format!("/posts/{}/live", Uuid::new_v4()),
        "/posts/999999".to_string(),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_web::test]
async fn test_like_json_returns_authoritative_count() {
    let state = state();
    let target = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    let app = app!(state);

    for expected in 1..=2 {
        let req = test::TestRequest::patch()
            .uri(&format!("/posts/{}/like", target.id))
            .insert_header((header::ACCEPT, "application/json"))
            .to_request();
        let like: LikeResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(like.id, target.id.to_string());
        assert_eq!(like.likes, expected);
    }

    let req = test::TestRequest::patch()
        .uri(&format!("/posts/{}/like", Uuid::new_v4()))
        .insert_header((header::ACCEPT, "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_like_on_post_with_five_likes_returns_six() {
    let state = state();
    let target = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    for _ in 0..5 {
        state.posts.like(target.id).await.unwrap();
    }
    let app = app!(state);

    let req = test::TestRequest::patch()
        .uri(&format!("/posts/{}/like", target.id))
        .insert_header((header::ACCEPT, "application/json"))
        .to_request();
    let like: LikeResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(like.likes, 6);

    let req = test::TestRequest::patch()
        .uri(&format!("/posts/{}/like", target.id))
        .insert_header((header::ACCEPT, STREAM_CONTENT_TYPE))
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains(r#"<span data-like-count>7</span>"#));
    assert_eq!(state.posts.get(target.id).await.unwrap().likes, 7);
}

#[actix_web::test]
async fn test_like_stream_replaces_counter_and_html_redirects() {
    let state = state();
    let target = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    let app = app!(state);

    let req = test::TestRequest::patch()
        .uri(&format!("/posts/{}/like", target.id))
        .insert_header((header::ACCEPT, STREAM_CONTENT_TYPE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        STREAM_CONTENT_TYPE
    );
    let body = body_text(resp).await;
    assert!(body.contains(&format!(
        r#"action="replace" target="post_{}_likes""#,
        target.id
    )));

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/like?_method=patch", target.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/posts");
    assert_eq!(state.posts.get(target.id).await.unwrap().likes, 2);
}

#[actix_web::test]
async fn test_comment_on_draft_is_refused() {
    let state = state();
    let draft = post(&state, "Borrador", "Contenido del borrador", false).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/comments", draft.id))
        .insert_header((header::ACCEPT, STREAM_CONTENT_TYPE))
        .set_form([("author_name", "Ana"), ("content", "Gran post")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(resp).await;
    assert!(body.contains(r#"target="comment_form""#));
    assert!(body.contains("está en borrador"));
    assert!(state.comments.for_post(draft.id).await.unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/comments", draft.id))
        .set_form([("author_name", "Ana"), ("content", "Gran post")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}", draft.id));
}

#[actix_web::test]
async fn test_invalid_comment_stream_rerenders_form() {
    let state = state();
    let target = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/comments", target.id))
        .insert_header((header::ACCEPT, STREAM_CONTENT_TYPE))
        .set_form([("author_name", "A"), ("content", "Hola")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_text(resp).await;
    assert!(body.contains(r#"target="comment_form""#));
    assert!(body.contains("Nombre es demasiado corto"));
}

#[actix_web::test]
async fn test_comment_updates_requester_and_live_viewers() {
    let state = state();
    let target = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    let channels: Vec<String> = Topic::for_post(target.id)
        .iter()
        .map(Topic::channel)
        .collect();
    let mut feed = LiveFeed::open(state.pubsub.clone(), &channels, Duration::from_secs(60))
        .await
        .unwrap();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/comments", target.id))
        .insert_header((header::ACCEPT, STREAM_CONTENT_TYPE))
        .set_form([("author_name", "Ana"), ("content", "Gran post, gracias")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_text(resp).await;
    for expected in [
        format!(r#"target="post_{}_comments""#, target.id),
        format!(r#"target="comments_count_{}""#, target.id),
        r#"target="comment_form""#.to_string(),
        r#"action="append" target="body""#.to_string(),
    ] {
        assert!(body.contains(&expected), "missing {}", expected);
    }

    let event = tokio::time::timeout(Duration::from_secs(1), feed.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let event = String::from_utf8(event.to_vec()).unwrap();
    assert!(event.starts_with("data: "));
    assert!(event.contains("Gran post, gracias"));
    assert!(event.contains(&format!("comments_count_{}", target.id)));
}

#[actix_web::test]
async fn test_comment_destroy_checks_parent() {
    let state = state();
    let first = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    let second = post(&state, "Ruby Guide", "Manual completo de Ruby", true).await;
    let comment = state
        .comments
        .create(
            first.id,
            CommentDraft {
                author_name: "Ana".to_string(),
                content: "Gran post".to_string(),
            },
        )
        .await
        .unwrap()
        .comment;
    let app = app!(state);

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}/comments/{}", second.id, comment.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!(
            "/posts/{}/comments/{}?_method=delete",
            first.id, comment.id
        ))
        .insert_header((header::ACCEPT, STREAM_CONTENT_TYPE))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Aún no hay comentarios"));
    assert!(state.comments.for_post(first.id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_destroy_post_cascades_and_flashes_title() {
    let state = state();
    let target = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    state
        .comments
        .create(
            target.id,
            CommentDraft {
                author_name: "Ana".to_string(),
                content: "Gran post".to_string(),
            },
        )
        .await
        .unwrap();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}?_method=delete", target.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/posts");
    assert!(state.comments.for_post(target.id).await.unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/posts")
        .cookie(session_cookie(&resp))
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Manual de Rails"));
    assert!(html.contains("fue eliminado exitosamente"));
}

#[actix_web::test]
async fn test_destroy_post_stream_removes_card() {
    let state = state();
    let target = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    let app = app!(state);

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", target.id))
        .insert_header((header::ACCEPT, STREAM_CONTENT_TYPE))
        .to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains(&format!(
        r#"<turbo-stream action="remove" target="post_{}"></turbo-stream>"#,
        target.id
    )));
    assert_eq!(state.posts.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_theme_toggle_round_trips() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/toggle_theme")
        .insert_header((header::REFERER, "/posts"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/posts");
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/").cookie(cookie.clone()).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains(r#"<html lang="es" class="dark">"#));

    let req = test::TestRequest::post()
        .uri("/toggle_theme")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/");

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(session_cookie(&resp))
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains(r#"<html lang="es" class="">"#));
}

#[actix_web::test]
async fn test_locale_switching() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post().uri("/set_locale/en").to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp);

    let req = test::TestRequest::get().uri("/").cookie(cookie.clone()).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Welcome to GiosaApp"));

    let req = test::TestRequest::post()
        .uri("/toggle_locale")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/")
        .cookie(session_cookie(&resp))
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Bienvenido a GiosaApp"));
}

#[actix_web::test]
async fn test_unsupported_locale_is_ignored() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post().uri("/set_locale/fr").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(resp.response().cookies().next().is_none());
}

#[actix_web::test]
async fn test_widget_script_is_served() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/assets/widgets.js").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .starts_with("application/javascript")
    );

    let script = body_text(resp).await;
    // Stale search responses are dropped and the spinner waits for pending debounces.
    assert!(script.contains("if (seq !== search.seq) return;"));
    assert!(script.contains("search.timer === null"));
    // One like in flight per button, rolled back on failure.
    assert!(script.contains(r#"form.dataset.likeState === "pending""#));
    assert!(script.contains("showLikes(form, current - 1, false)"));
    assert!(script.contains("form[data-confirm]"));
}

#[actix_web::test]
async fn test_show_page_wires_widgets() {
    let state = state();
    let target = post(&state, "Manual de Rails", "Este es un contenido sobre Rails", true).await;
    for _ in 0..3 {
        state.posts.like(target.id).await.unwrap();
    }
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", target.id))
        .to_request();
    let html = body_text(test::call_service(&app, req).await).await;

    assert!(html.contains(r#"<script src="/assets/widgets.js" defer></script>"#));
    assert!(html.contains(r#"data-debounce-ms="300""#));
    assert!(html.contains(r#"data-like-error-ms="1000""#));
    assert!(html.contains(r#"data-results-frame="posts_list""#));
    assert!(html.contains(&format!(r#"data-like-url="/posts/{}/like""#, target.id)));
    assert!(html.contains(r#"data-like-count="3""#));
    assert!(html.contains("data-confirm-modal"));
    assert!(html.contains(r#"data-confirm-title="¿Eliminar este post?""#));
    assert!(!html.contains("data-turbo-confirm"));
}
