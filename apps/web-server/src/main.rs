//! # Giosa Web Server
//!
//! The blog served over actix-web: server-rendered pages, stream
//! fragments for in-place updates, and an SSE feed per post.

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod i18n;
mod middleware;
mod realtime;
mod response_kind;
mod seed;
mod session;
mod state;
mod telemetry;
mod views;

use config::{AppConfig, SessionConfig};
use middleware::method_override::MethodOverride;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

const SESSION_COOKIE: &str = "_giosa_session";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Giosa web server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;

    if config.seed_demo_data {
        if let Err(e) = seed::seed_demo_posts(&state).await {
            tracing::error!(error = %e, "Demo seed failed");
        }
    }

    let key = session_key(&config.session);
    let cookie_secure = config.session.cookie_secure;

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_name(SESSION_COOKIE.to_string())
                    .cookie_secure(cookie_secure)
                    .build(),
            )
            .wrap(TracingLogger::default())
            .wrap(MethodOverride)
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// Signing key for the session cookie.
///
/// Without a usable secret, sessions do not survive a restart.
fn session_key(config: &SessionConfig) -> Key {
    match config.secret.as_deref().map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(e)) => {
            tracing::warn!(error = %e, "SESSION_SECRET unusable; generating a random key");
            Key::generate()
        }
        None => {
            tracing::warn!("SESSION_SECRET not set; generating a random key");
            Key::generate()
        }
    }
}
