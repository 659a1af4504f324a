//! Theme and language switches kept in the session cookie.

use actix_session::Session;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use giosa_shared::Locale;

use crate::middleware::error::AppResult;
use crate::session;

use super::see_other;

/// Back to the page the switch was pressed on.
fn back(req: &HttpRequest) -> HttpResponse {
    let referer = req
        .headers()
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or("/");
    see_other(referer)
}

/// POST /toggle_theme
pub async fn toggle_theme(req: HttpRequest, session: Session) -> AppResult<HttpResponse> {
    let theme = session::toggle_theme(&session)?;
    tracing::debug!(?theme, "Theme toggled");
    Ok(back(&req))
}

/// POST /toggle_locale
pub async fn toggle_locale(req: HttpRequest, session: Session) -> AppResult<HttpResponse> {
    let locale = session::toggle_locale(&session)?;
    tracing::debug!(locale = locale.code(), "Locale toggled");
    Ok(back(&req))
}

/// POST /set_locale/{locale}
///
/// Unsupported locales leave the session alone.
pub async fn set_locale(
    req: HttpRequest,
    session: Session,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    match path.parse::<Locale>() {
        Ok(locale) => session::set_locale(&session, locale)?,
        Err(e) => tracing::debug!(error = %e, "Ignoring locale change"),
    }
    Ok(back(&req))
}
