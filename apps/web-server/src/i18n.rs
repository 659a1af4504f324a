//! Interface strings in Spanish and English.

use giosa_core::domain::{Field, Violation};
use giosa_shared::Locale;

/// (key, es, en)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("app.name", "GiosaApp", "GiosaApp"),
    ("nav.home", "Inicio", "Home"),
    ("nav.posts", "Posts", "Posts"),
    ("nav.new_post", "Nuevo Post", "New Post"),
    ("nav.toggle_theme", "Cambiar tema", "Toggle theme"),
    ("nav.switch_language", "English", "Español"),
    ("home.title", "Bienvenido a GiosaApp", "Welcome to GiosaApp"),
    (
        "home.subtitle",
        "Un blog con comentarios en vivo, búsqueda instantánea y temas claro y oscuro.",
        "A blog with live comments, instant search and light and dark themes.",
    ),
    ("home.recent_posts", "Posts recientes", "Recent posts"),
    ("home.total_posts", "Posts en total", "Posts in total"),
    ("home.no_posts", "No hay posts aún", "No posts yet"),
    ("home.create_post", "Crear post", "Create post"),
    ("home.view_all", "Ver todos los posts", "View all posts"),
    ("posts.title", "Posts", "Posts"),
    ("posts.search_placeholder", "Buscar posts...", "Search posts..."),
    ("posts.searching", "Buscando...", "Searching..."),
    ("posts.no_results", "No se encontraron posts", "No posts found"),
    ("posts.empty", "No hay posts aún", "No posts yet"),
    ("posts.new", "Nuevo Post", "New Post"),
    ("posts.edit", "Editar", "Edit"),
    ("posts.edit_title", "Editar post", "Edit post"),
    ("posts.show", "Ver", "View"),
    ("posts.delete", "Eliminar", "Delete"),
    ("posts.back", "Volver a posts", "Back to posts"),
    ("posts.published", "Publicado", "Published"),
    ("posts.draft", "Borrador", "Draft"),
    ("posts.likes", "Me gusta", "Likes"),
    ("posts.like_failed", "No se pudo registrar el me gusta", "Could not register the like"),
    ("posts.comments", "Comentarios", "Comments"),
    ("posts.confirm_delete_title", "¿Eliminar este post?", "Delete this post?"),
    (
        "posts.confirm_delete_body",
        "Esta acción no se puede deshacer. Los comentarios también se eliminarán.",
        "This cannot be undone. Its comments will be deleted too.",
    ),
    ("posts.cancel", "Cancelar", "Cancel"),
    ("posts.deleting", "Eliminando...", "Deleting..."),
    ("form.title", "Título", "Title"),
    ("form.content", "Contenido", "Content"),
    ("form.published", "Publicado", "Published"),
    ("form.save", "Guardar post", "Save post"),
    (
        "form.errors_heading",
        "No se pudo guardar el post:",
        "The post could not be saved:",
    ),
    ("comments.title", "Comentarios", "Comments"),
    ("comments.empty", "Aún no hay comentarios", "No comments yet"),
    ("comments.author_name", "Nombre", "Name"),
    ("comments.content", "Comentario", "Comment"),
    ("comments.submit", "Agregar comentario", "Add comment"),
    ("comments.delete", "Eliminar", "Delete"),
    ("comments.confirm_delete", "¿Eliminar este comentario?", "Delete this comment?"),
    (
        "comments.draft_notice",
        "Este post no permite comentarios porque está en borrador",
        "This post does not accept comments because it is a draft",
    ),
    ("messages.post_created", "Post creado exitosamente", "Post was successfully created"),
    (
        "messages.post_updated",
        "Post actualizado exitosamente",
        "Post was successfully updated",
    ),
    ("messages.post_deleted", "fue eliminado exitosamente", "was successfully deleted"),
    (
        "messages.comment_created",
        "Comentario agregado exitosamente",
        "Comment was successfully added",
    ),
    (
        "messages.comment_deleted",
        "Comentario eliminado exitosamente",
        "Comment was successfully deleted",
    ),
    (
        "messages.comment_error",
        "No se pudo agregar el comentario",
        "The comment could not be added",
    ),
    (
        "messages.draft_comment_error",
        "No se puede comentar: el post no permite comentarios porque está en borrador",
        "Cannot comment: the post does not accept comments because it is a draft",
    ),
    ("toasts.comment_added", "💬 Comentario agregado", "💬 Comment added"),
    ("toasts.comment_deleted", "🗑️ Comentario eliminado", "🗑️ Comment deleted"),
    ("toasts.post_deleted", "🗑️ Post eliminado", "🗑️ Post deleted"),
    ("toasts.close", "Cerrar", "Close"),
    ("fields.title", "Título", "Title"),
    ("fields.content", "Contenido", "Content"),
    ("fields.author_name", "Nombre", "Name"),
    ("fields.post", "Post", "Post"),
    ("errors.blank", "no puede estar en blanco", "can't be blank"),
    ("errors.too_short", "es demasiado corto (mínimo {count} caracteres)", "is too short (minimum is {count} characters)"),
    (
        "errors.comments_closed",
        "no permite comentarios porque está en borrador",
        "does not accept comments because it is a draft",
    ),
];

/// Look up `key`; unknown keys come back unchanged.
pub fn translate(locale: Locale, key: &'static str) -> &'static str {
    MESSAGES
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, es, en)| match locale {
            Locale::Es => *es,
            Locale::En => *en,
        })
        .unwrap_or(key)
}

fn field_key(field: Field) -> &'static str {
    match field {
        Field::Title => "fields.title",
        Field::Content => "fields.content",
        Field::AuthorName => "fields.author_name",
        Field::Post => "fields.post",
    }
}

/// Message for one violation, without the field name.
pub fn violation_message(locale: Locale, violation: &Violation) -> String {
    match violation {
        Violation::Blank => translate(locale, "errors.blank").to_string(),
        Violation::TooShort { min } => {
            translate(locale, "errors.too_short").replace("{count}", &min.to_string())
        }
        Violation::CommentsClosed => translate(locale, "errors.comments_closed").to_string(),
    }
}

/// "Título no puede estar en blanco"
pub fn full_message(locale: Locale, field: Field, violation: &Violation) -> String {
    format!(
        "{} {}",
        translate(locale, field_key(field)),
        violation_message(locale, violation)
    )
}
