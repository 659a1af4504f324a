//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub database: &'static str,
}

/// Health check endpoint - returns server and database status.
///
/// GET /up
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = database_status(&state).await;
    let response = HealthResponse {
        status: if database == "down" { "degraded" } else { "ok" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database,
    };

    if database == "down" {
        HttpResponse::ServiceUnavailable().json(response)
    } else {
        HttpResponse::Ok().json(response)
    }
}

#[cfg(feature = "postgres")]
async fn database_status(state: &AppState) -> &'static str {
    let Some(db) = state.db.as_ref() else {
        return "memory";
    };
    match db.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::error!(error = %e, "Database ping failed");
            "down"
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn database_status(_state: &AppState) -> &'static str {
    "memory"
}
