//! Static script for the browser widgets, compiled into the binary.

use actix_web::HttpResponse;
use actix_web::http::header;

const WIDGETS_JS: &str = include_str!("../../assets/widgets.js");

/// GET /assets/widgets.js
pub async fn widgets_js() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
        .body(WIDGETS_JS)
}
