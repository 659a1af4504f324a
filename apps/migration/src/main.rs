//! Migration CLI tool.
//!
//! Reads `DATABASE_URL`; run `migration up` to bring the schema current.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Running blog migrations");
    cli::run_cli(migration::Migrator).await;
}
