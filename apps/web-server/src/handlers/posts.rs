//! Post handlers.

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use askama::Template;
use uuid::Uuid;

use giosa_core::DomainError;
use giosa_core::domain::PostDraft;
use giosa_shared::dto::{IndexQuery, LikeResponse, PostDetailResponse, PostForm};
use giosa_shared::client::RESULTS_FRAME;
use giosa_shared::{StreamFragment, Toast};

use crate::middleware::error::AppResult;
use crate::response_kind::ResponseKind;
use crate::session;
use crate::state::AppState;
use crate::views::{
    CommentFormView, FormErrors, LikesPartial, PostFormPage, PostFormView, PostShowPage,
    PostsFrame, PostsIndexPage, ToastPartial, ViewContext,
};

use super::{Submitted, comment_json, html, post_json, see_other, stream, submitted};

fn draft(form: &PostForm) -> PostDraft {
    PostDraft {
        title: form.title.clone(),
        content: form.content.clone(),
        published: form.is_published(),
    }
}

/// GET /posts
pub async fn index(
    state: web::Data<AppState>,
    ctx: ViewContext,
    kind: ResponseKind,
    query: web::Query<IndexQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let posts = state.posts.list(query.search.as_deref()).await?;
    let search = query.search.unwrap_or_default();

    match kind {
        ResponseKind::Json => {
            let body: Vec<_> = posts.iter().map(post_json).collect();
            Ok(HttpResponse::Ok().json(body))
        }
        ref frame if frame.is_frame(RESULTS_FRAME) => {
            let frame = PostsFrame { ctx, posts, search };
            Ok(html(StatusCode::OK, frame.render()?))
        }
        _ => {
            let page = PostsIndexPage { ctx, posts, search };
            Ok(html(StatusCode::OK, page.render()?))
        }
    }
}

/// GET /posts/new
pub async fn new_post(ctx: ViewContext) -> AppResult<HttpResponse> {
    let page = PostFormPage {
        ctx,
        form: PostFormView::default(),
        errors: FormErrors::default(),
        post_id: None,
    };
    Ok(html(StatusCode::OK, page.render()?))
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    ctx: ViewContext,
    kind: ResponseKind,
    session: Session,
    body: Submitted<PostForm>,
) -> AppResult<HttpResponse> {
    let form = submitted(body);

    match state.posts.create(draft(&form)).await {
        Ok(post) if kind == ResponseKind::Json => Ok(HttpResponse::Created()
            .insert_header(("Location", format!("/posts/{}", post.id)))
            .json(post_json(&post))),
        Ok(post) => {
            session::flash(&session, &Toast::success(ctx.t("messages.post_created")))?;
            Ok(see_other(&format!("/posts/{}", post.id)))
        }
        Err(DomainError::Validation(errors)) if kind != ResponseKind::Json => {
            let page = PostFormPage {
                errors: FormErrors::localized(&errors, ctx.locale),
                form: PostFormView::from(&form),
                post_id: None,
                ctx,
            };
            Ok(html(StatusCode::UNPROCESSABLE_ENTITY, page.render()?))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /posts/{id}
pub async fn show(
    state: web::Data<AppState>,
    ctx: ViewContext,
    kind: ResponseKind,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    let comments = state.comments.for_post(post.id).await?;

    if kind == ResponseKind::Json {
        return Ok(HttpResponse::Ok().json(PostDetailResponse {
            post: post_json(&post),
            comments: comments.iter().map(comment_json).collect(),
        }));
    }

    let page = PostShowPage {
        ctx,
        post,
        comments,
        comment_form: CommentFormView::default(),
        comment_errors: FormErrors::default(),
    };
    Ok(html(StatusCode::OK, page.render()?))
}

/// GET /posts/{id}/edit
pub async fn edit(
    state: web::Data<AppState>,
    ctx: ViewContext,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;

    let page = PostFormPage {
        ctx,
        form: PostFormView::from(&post),
        errors: FormErrors::default(),
        post_id: Some(post.id.to_string()),
    };
    Ok(html(StatusCode::OK, page.render()?))
}

/// PATCH/PUT /posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    ctx: ViewContext,
    kind: ResponseKind,
    session: Session,
    path: web::Path<Uuid>,
    body: Submitted<PostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let form = submitted(body);

    match state.posts.update(id, draft(&form)).await {
        Ok(post) if kind == ResponseKind::Json => Ok(HttpResponse::Ok().json(post_json(&post))),
        Ok(post) => {
            session::flash(&session, &Toast::success(ctx.t("messages.post_updated")))?;
            Ok(see_other(&format!("/posts/{}", post.id)))
        }
        Err(DomainError::Validation(errors)) if kind != ResponseKind::Json => {
            let page = PostFormPage {
                errors: FormErrors::localized(&errors, ctx.locale),
                form: PostFormView::from(&form),
                post_id: Some(id.to_string()),
                ctx,
            };
            Ok(html(StatusCode::UNPROCESSABLE_ENTITY, page.render()?))
        }
        Err(e) => Err(e.into()),
    }
}

/// DELETE /posts/{id}
///
/// Comments go with the post.
pub async fn destroy(
    state: web::Data<AppState>,
    ctx: ViewContext,
    kind: ResponseKind,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.delete(path.into_inner()).await?;
    let message = format!("\"{}\" {}", post.title, ctx.t("messages.post_deleted"));

    match kind {
        ResponseKind::Json => Ok(HttpResponse::NoContent().finish()),
        ResponseKind::Stream => {
            let toast = ToastPartial {
                toast: ctx.toast(&Toast::success(message).with_title(ctx.t("toasts.post_deleted"))),
            };
            Ok(stream(
                StatusCode::OK,
                &[
                    StreamFragment::remove(format!("post_{}", post.id)),
                    StreamFragment::append("body", toast.render()?),
                ],
            ))
        }
        _ => {
            session::flash(&session, &Toast::success(message))?;
            Ok(see_other("/posts"))
        }
    }
}

/// PATCH /posts/{id}/like
pub async fn like(
    state: web::Data<AppState>,
    ctx: ViewContext,
    kind: ResponseKind,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.like(path.into_inner()).await?;

    match kind {
        ResponseKind::Json => Ok(HttpResponse::Ok().json(LikeResponse {
            id: post.id.to_string(),
            likes: post.likes,
        })),
        ResponseKind::Stream => {
            let target = format!("post_{}_likes", post.id);
            let likes = LikesPartial { ctx, post };
            Ok(stream(
                StatusCode::OK,
                &[StreamFragment::replace(target, likes.render()?)],
            ))
        }
        _ => Ok(see_other("/posts")),
    }
}
