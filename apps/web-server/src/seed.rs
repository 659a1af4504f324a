//! Demo content for an empty blog.

use giosa_core::DomainError;
use giosa_core::domain::PostDraft;

use crate::state::AppState;

const DEMO_POSTS: &[(&str, &str, bool)] = &[
    (
        "Bienvenido a GiosaApp",
        "El primer post del blog.\n\nAquí puedes probar:\n- Comentarios en vivo\n- Búsqueda instantánea\n- Tema claro y oscuro\n\n¡Explora y comenta!",
        true,
    ),
    (
        "Actualizaciones en vivo con Turbo Streams",
        "Abre este post en dos pestañas y agrega un comentario.\n\nLa lista y el contador se actualizan solos en ambas, sin recargar la página.",
        true,
    ),
    (
        "Styling con Tailwind CSS",
        "Tailwind permite construir interfaces con clases utilitarias.\n\nEste post es un borrador, así que todavía no acepta comentarios.",
        false,
    ),
    (
        "Rust en el servidor",
        "El servidor de este blog está escrito en Rust con actix-web.\n\nLas plantillas se compilan junto con el binario y los cambios se publican por pub/sub.",
        true,
    ),
];

/// Insert the demo posts when the store has none. Returns how many
/// were created.
pub async fn seed_demo_posts(state: &AppState) -> Result<usize, DomainError> {
    if state.posts.count().await? > 0 {
        tracing::debug!("Posts present; skipping demo seed");
        return Ok(0);
    }

    for (title, content, published) in DEMO_POSTS {
        state
            .posts
            .create(PostDraft {
                title: title.to_string(),
                content: content.to_string(),
                published: *published,
            })
            .await?;
    }

    tracing::info!(count = DEMO_POSTS.len(), "Demo posts seeded");
    Ok(DEMO_POSTS.len())
}
