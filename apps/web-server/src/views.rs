//! Askama views and the per-request rendering context.

use std::future::{Ready, ready};

use actix_session::SessionExt;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use askama::Template;

use giosa_core::domain::{Comment, Field, Post, ValidationErrors};
use giosa_shared::dto::{CommentForm, PostForm};
use giosa_shared::notification::ToastStyle;
use giosa_shared::{ClientSettings, Locale, Theme, Toast};

use crate::{i18n, session};

/// Theme, locale and pending flash for one request.
///
/// Extracting it consumes the flash.
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    pub theme: Theme,
    pub locale: Locale,
    pub flash: Option<Toast>,
    pub path: String,
}

impl ViewContext {
    /// Context for fragments pushed to live subscribers, whose
    /// preferences are unknown.
    pub fn broadcast() -> Self {
        Self::default()
    }

    pub fn t(&self, key: &'static str) -> &'static str {
        i18n::translate(self.locale, key)
    }

    pub fn lang(&self) -> &'static str {
        self.locale.code()
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn theme_classes<'a>(&self, light: &'a str, dark: &'a str) -> &'a str {
        self.theme.pick(light, dark)
    }

    pub fn nav_class(&self, href: &str) -> &'static str {
        let active = if href == "/" {
            self.path == "/"
        } else {
            self.path.starts_with(href)
        };
        match (active, self.is_dark()) {
            (true, false) => "bg-gradient-to-r from-blue-500 to-purple-600 text-white shadow-lg",
            (true, true) => "bg-gradient-to-r from-blue-600 to-purple-700 text-white shadow-lg",
            (false, false) => "text-gray-700 hover:text-gray-900 hover:bg-gray-100",
            (false, true) => "text-gray-300 hover:text-white hover:bg-gray-700",
        }
    }

    pub fn toasts(&self) -> Vec<ToastView> {
        self.flash
            .iter()
            .map(|toast| ToastView::new(toast, self.theme))
            .collect()
    }

    /// Widget timings for the `<body>` data attributes.
    pub fn client(&self) -> Vec<(&'static str, String)> {
        ClientSettings::default().data_attributes()
    }

    pub fn toast(&self, toast: &Toast) -> ToastView {
        ToastView::new(toast, self.theme)
    }

    fn load(req: &HttpRequest) -> Self {
        let session = req.get_session();
        Self {
            theme: session::theme(&session),
            locale: session::locale(&session),
            flash: session::take_flash(&session),
            path: req.path().to_string(),
        }
    }
}

impl FromRequest for ViewContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(ViewContext::load(req)))
    }
}

/// A toast resolved against the current theme.
#[derive(Debug, Clone)]
pub struct ToastView {
    pub kind: &'static str,
    pub title: String,
    pub message: String,
    pub style: ToastStyle,
    pub duration_ms: u64,
}

impl ToastView {
    pub fn new(toast: &Toast, theme: Theme) -> Self {
        Self {
            kind: toast.kind.as_str(),
            title: toast.title.clone().unwrap_or_default(),
            message: toast.message.clone(),
            style: toast.style(theme),
            duration_ms: toast
                .duration_ms
                .unwrap_or(giosa_shared::notification::DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Localized validation messages for a form.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    entries: Vec<(Field, String, String)>,
}

impl FormErrors {
    pub fn localized(errors: &ValidationErrors, locale: Locale) -> Self {
        Self {
            entries: errors
                .iter()
                .map(|(field, violation)| {
                    (
                        *field,
                        i18n::violation_message(locale, violation),
                        i18n::full_message(locale, *field, violation),
                    )
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `field` is the form input name.
    pub fn has(&self, field: &str) -> bool {
        self.entries.iter().any(|(f, _, _)| f.as_str() == field)
    }

    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(f, _, _)| f.as_str() == field)
            .map(|(_, message, _)| message.as_str())
            .collect()
    }

    pub fn full_messages(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, _, full)| full.as_str()).collect()
    }
}

/// Values shown in the post form.
#[derive(Debug, Clone, Default)]
pub struct PostFormView {
    pub title: String,
    pub content: String,
    pub published: bool,
}

impl From<&Post> for PostFormView {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            published: post.published,
        }
    }
}

impl From<&PostForm> for PostFormView {
    fn from(form: &PostForm) -> Self {
        Self {
            title: form.title.clone(),
            content: form.content.clone(),
            published: form.is_published(),
        }
    }
}

/// Values shown in the comment form.
#[derive(Debug, Clone, Default)]
pub struct CommentFormView {
    pub author_name: String,
    pub content: String,
}

impl From<&CommentForm> for CommentFormView {
    fn from(form: &CommentForm) -> Self {
        Self {
            author_name: form.author_name.clone(),
            content: form.content.clone(),
        }
    }
}

// Pages

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub ctx: ViewContext,
    pub posts: Vec<Post>,
    pub total: u64,
}

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct PostsIndexPage {
    pub ctx: ViewContext,
    pub posts: Vec<Post>,
    pub search: String,
}

/// Only the `posts_list` frame.
#[derive(Template)]
#[template(path = "posts/frame.html")]
pub struct PostsFrame {
    pub ctx: ViewContext,
    pub posts: Vec<Post>,
    pub search: String,
}

#[derive(Template)]
#[template(path = "posts/show.html")]
pub struct PostShowPage {
    pub ctx: ViewContext,
    pub post: Post,
    pub comments: Vec<Comment>,
    pub comment_form: CommentFormView,
    pub comment_errors: FormErrors,
}

#[derive(Template)]
#[template(path = "posts/form.html")]
pub struct PostFormPage {
    pub ctx: ViewContext,
    pub form: PostFormView,
    pub errors: FormErrors,
    /// Set when editing an existing post.
    pub post_id: Option<String>,
}

impl PostFormPage {
    pub fn is_edit(&self) -> bool {
        self.post_id.is_some()
    }

    pub fn action(&self) -> String {
        match &self.post_id {
            Some(id) => format!("/posts/{}?_method=patch", id),
            None => "/posts".to_string(),
        }
    }

    pub fn cancel_href(&self) -> String {
        match &self.post_id {
            Some(id) => format!("/posts/{}", id),
            None => "/posts".to_string(),
        }
    }
}

// Partials

#[derive(Template)]
#[template(path = "posts/_card.html")]
pub struct PostCardPartial {
    pub ctx: ViewContext,
    pub post: Post,
}

#[derive(Template)]
#[template(path = "posts/_likes.html")]
pub struct LikesPartial {
    pub ctx: ViewContext,
    pub post: Post,
}

#[derive(Template)]
#[template(path = "comments/_list.html")]
pub struct CommentsListPartial<'a> {
    pub ctx: &'a ViewContext,
    pub post: &'a Post,
    pub comments: &'a [Comment],
}

#[derive(Template)]
#[template(path = "comments/_count.html")]
pub struct CommentsCountPartial<'a> {
    pub ctx: &'a ViewContext,
    pub post: &'a Post,
    pub count: usize,
}

#[derive(Template)]
#[template(path = "comments/_form.html")]
pub struct CommentFormPartial<'a> {
    pub ctx: &'a ViewContext,
    pub post: &'a Post,
    pub comment_form: CommentFormView,
    pub comment_errors: FormErrors,
}

#[derive(Template)]
#[template(path = "comments/_draft_message.html")]
pub struct DraftMessagePartial<'a> {
    pub ctx: &'a ViewContext,
    pub post: &'a Post,
}

#[derive(Template)]
#[template(path = "shared/_toast.html")]
pub struct ToastPartial {
    pub toast: ToastView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use giosa_core::domain::{PostDraft, Violation};

    fn post(published: bool) -> Post {
        Post::new(PostDraft {
            title: "Manual de Rails".to_string(),
            content: "Este es un contenido sobre Rails".to_string(),
            published,
        })
    }

    #[test]
    fn test_form_errors_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::Title, Violation::Blank);
        errors.add(Field::Title, Violation::TooShort { min: 5 });

        let form = FormErrors::localized(&errors, Locale::En);
        assert!(form.has("title"));
        assert!(!form.has("content"));
        assert_eq!(form.messages_for("title").len(), 2);
        assert_eq!(form.full_messages()[0], "Title can't be blank");
    }

    #[test]
    fn test_nav_class_marks_active_section() {
        let mut ctx = ViewContext::default();
        ctx.path = "/posts/new".to_string();
        assert!(ctx.nav_class("/posts").contains("gradient"));
        assert!(!ctx.nav_class("/").contains("gradient"));
    }

    #[test]
    fn test_likes_partial_targets_post() {
        let post = post(true);
        let html = LikesPartial {
            ctx: ViewContext::default(),
            post: post.clone(),
        }
        .render()
        .unwrap();
        assert!(html.contains(&format!("post_{}_likes", post.id)));
    }

    #[test]
    fn test_draft_message_mentions_draft() {
        let post = post(false);
        let ctx = ViewContext {
            locale: Locale::Es,
            ..ViewContext::default()
        };
        let html = DraftMessagePartial {
            ctx: &ctx,
            post: &post,
        }
        .render()
        .unwrap();
        assert!(html.contains("no permite comentarios porque está en borrador"));
        assert!(html.contains(r#"id="comment_form""#));
    }

    #[test]
    fn test_comment_list_renders_every_comment() {
        let post = post(true);
        let comments: Vec<Comment> = ["Ana", "Luis"]
            .into_iter()
            .map(|name| {
                Comment::new(
                    post.id,
                    giosa_core::domain::CommentDraft {
                        author_name: name.to_string(),
                        content: "Buen post".to_string(),
                    },
                )
            })
            .collect();
        let ctx = ViewContext::broadcast();

        let html = CommentsListPartial {
            ctx: &ctx,
            post: &post,
            comments: &comments,
        }
        .render()
        .unwrap();
        assert!(html.contains(&format!(r#"id="post_{}_comments""#, post.id)));
        for comment in &comments {
            assert!(html.contains(&format!("comment_{}", comment.id)));
        }
    }
}
