//! Comment handlers.
//!
//! Live viewers get the new list through the broadcaster; these
//! responses only update the page that made the request.

use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use askama::Template;
use uuid::Uuid;

use giosa_core::DomainError;
use giosa_core::domain::CommentDraft;
use giosa_core::services::CommentOutcome;
use giosa_shared::dto::CommentForm;
use giosa_shared::{StreamFragment, Toast, ToastKind};

use crate::middleware::error::AppResult;
use crate::realtime::{comments_count_target, comments_target};
use crate::response_kind::ResponseKind;
use crate::session;
use crate::state::AppState;
use crate::views::{
    CommentFormPartial, CommentFormView, CommentsCountPartial, CommentsListPartial,
    DraftMessagePartial, FormErrors, ToastPartial, ViewContext,
};

use super::{Submitted, comment_json, see_other, stream, submitted};

const COMMENT_FORM: &str = "comment_form";

/// List and counter as they stand after the change, then a toast.
fn refreshed(
    ctx: &ViewContext,
    outcome: &CommentOutcome,
    toast: Toast,
) -> AppResult<Vec<StreamFragment>> {
    let list = CommentsListPartial {
        ctx,
        post: &outcome.post,
        comments: &outcome.comments,
    };
    let count = CommentsCountPartial {
        ctx,
        post: &outcome.post,
        count: outcome.count(),
    };
    let toast = ToastPartial {
        toast: ctx.toast(&toast),
    };

    Ok(vec![
        StreamFragment::replace(comments_target(outcome.post.id), list.render()?),
        StreamFragment::replace(comments_count_target(outcome.post.id), count.render()?),
        StreamFragment::append("body", toast.render()?),
    ])
}

/// POST /posts/{post_id}/comments
pub async fn create(
    state: web::Data<AppState>,
    ctx: ViewContext,
    kind: ResponseKind,
    session: Session,
    path: web::Path<Uuid>,
    body: Submitted<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let form = submitted(body);
    let draft = CommentDraft {
        author_name: form.author_name.clone(),
        content: form.content.clone(),
    };
    let post_href = format!("/posts/{}", post_id);

    let outcome = match state.comments.create(post_id, draft).await {
        Ok(outcome) => outcome,
        Err(e @ DomainError::CommentsClosed { .. }) => {
            return match kind {
                ResponseKind::Json => Err(e.into()),
                ResponseKind::Stream => {
                    let post = state.posts.get(post_id).await?;
                    let notice = DraftMessagePartial { ctx: &ctx, post: &post };
                    Ok(stream(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        &[StreamFragment::replace(COMMENT_FORM, notice.render()?)],
                    ))
                }
                _ => {
                    let toast = Toast::error(ctx.t("messages.draft_comment_error"));
                    session::flash(&session, &toast)?;
                    Ok(see_other(&post_href))
                }
            };
        }
        Err(DomainError::Validation(errors)) if kind != ResponseKind::Json => {
            return match kind {
                ResponseKind::Stream => {
                    let post = state.posts.get(post_id).await?;
                    let partial = CommentFormPartial {
                        ctx: &ctx,
                        post: &post,
                        comment_form: CommentFormView::from(&form),
                        comment_errors: FormErrors::localized(&errors, ctx.locale),
                    };
                    Ok(stream(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        &[StreamFragment::replace(COMMENT_FORM, partial.render()?)],
                    ))
                }
                _ => {
                    session::flash(&session, &Toast::error(ctx.t("messages.comment_error")))?;
                    Ok(see_other(&post_href))
                }
            };
        }
        Err(e) => return Err(e.into()),
    };

    match kind {
        ResponseKind::Json => Ok(HttpResponse::Created().json(comment_json(&outcome.comment))),
        ResponseKind::Stream => {
            let toast = Toast::new(ToastKind::Comment, ctx.t("messages.comment_created"))
                .with_title(ctx.t("toasts.comment_added"));
            let mut fragments = refreshed(&ctx, &outcome, toast)?;
            let blank = CommentFormPartial {
                ctx: &ctx,
                post: &outcome.post,
                comment_form: CommentFormView::default(),
                comment_errors: FormErrors::default(),
            };
            fragments.insert(2, StreamFragment::replace(COMMENT_FORM, blank.render()?));
            Ok(stream(StatusCode::OK, &fragments))
        }
        _ => {
            session::flash(&session, &Toast::success(ctx.t("messages.comment_created")))?;
            Ok(see_other(&post_href))
        }
    }
}

/// DELETE /posts/{post_id}/comments/{id}
pub async fn destroy(
    state: web::Data<AppState>,
    ctx: ViewContext,
    kind: ResponseKind,
    session: Session,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let outcome = state.comments.destroy(post_id, comment_id).await?;

    match kind {
        ResponseKind::Json => Ok(HttpResponse::NoContent().finish()),
        ResponseKind::Stream => {
            let toast = Toast::success(ctx.t("messages.comment_deleted"))
                .with_title(ctx.t("toasts.comment_deleted"));
            Ok(stream(StatusCode::OK, &refreshed(&ctx, &outcome, toast)?))
        }
        _ => {
            session::flash(&session, &Toast::success(ctx.t("messages.comment_deleted")))?;
            Ok(see_other(&format!("/posts/{}", post_id)))
        }
    }
}
