//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use giosa_core::ports::{CommentRepository, PostRepository, PubSub};
use giosa_core::services::{Broadcaster, CommentService, PostService};
use giosa_infra::{DatabaseConnections, InMemoryPubSub, InMemoryStore};

#[cfg(feature = "postgres")]
use giosa_infra::database::{PostgresCommentRepository, PostgresPostRepository};
#[cfg(feature = "redis")]
use giosa_infra::{RedisConfig, RedisPubSub};

use crate::config::AppConfig;
use crate::realtime::FragmentHook;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub comments: CommentService,
    pub pubsub: Arc<dyn PubSub>,
    pub db: Option<Arc<DatabaseConnections>>,
    pub live_keepalive: Duration,
}

type Repositories = (Arc<dyn PostRepository>, Arc<dyn CommentRepository>);

fn in_memory_repositories() -> Repositories {
    let store = InMemoryStore::new();
    (Arc::new(store.clone()), Arc::new(store))
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Unreachable backends fall back to in-memory implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (db, repos) = Self::init_database(config).await;
        let pubsub = Self::init_pubsub(config).await;

        tracing::info!(database = db.is_some(), "Application state initialized");
        Self::assemble(repos, pubsub, db, config.live_keepalive)
    }

    /// Fully in-memory state.
    pub fn in_memory(config: &AppConfig) -> Self {
        let pubsub: Arc<dyn PubSub> = Arc::new(InMemoryPubSub::new(config.pubsub_buffer_size));
        Self::assemble(in_memory_repositories(), pubsub, None, config.live_keepalive)
    }

    fn assemble(
        (posts, comments): Repositories,
        pubsub: Arc<dyn PubSub>,
        db: Option<Arc<DatabaseConnections>>,
        live_keepalive: Duration,
    ) -> Self {
        let broadcaster = Broadcaster::new(pubsub.clone(), Arc::new(FragmentHook::new()));

        Self {
            posts: PostService::new(posts.clone(), broadcaster.clone()),
            comments: CommentService::new(posts, comments, broadcaster),
            pubsub,
            db,
            live_keepalive,
        }
    }

    #[cfg(feature = "postgres")]
    async fn init_database(config: &AppConfig) -> (Option<Arc<DatabaseConnections>>, Repositories) {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (None, in_memory_repositories());
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => {
                let conn = Arc::new(connections);
                let posts: Arc<dyn PostRepository> =
                    Arc::new(PostgresPostRepository::new(conn.main.clone()));
                let comments: Arc<dyn CommentRepository> =
                    Arc::new(PostgresCommentRepository::new(conn.main.clone()));
                (Some(conn), (posts, comments))
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (None, in_memory_repositories())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn init_database(_config: &AppConfig) -> (Option<Arc<DatabaseConnections>>, Repositories) {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        (None, in_memory_repositories())
    }

    #[cfg(feature = "redis")]
    async fn init_pubsub(config: &AppConfig) -> Arc<dyn PubSub> {
        if let Some(url) = config.redis_url.as_deref() {
            let redis_config =
                RedisConfig::new(url).with_connect_timeout(config.redis_connect_timeout);
            match RedisPubSub::new(redis_config).await {
                Ok(pubsub) => return Arc::new(pubsub),
                Err(e) => {
                    tracing::error!("Failed to connect to Redis: {}. Using in-memory pub/sub.", e)
                }
            }
        }
        Arc::new(InMemoryPubSub::new(config.pubsub_buffer_size))
    }

    #[cfg(not(feature = "redis"))]
    async fn init_pubsub(config: &AppConfig) -> Arc<dyn PubSub> {
        if config.redis_url.is_some() {
            tracing::warn!("REDIS_URL set but the redis feature is disabled");
        }
        Arc::new(InMemoryPubSub::new(config.pubsub_buffer_size))
    }
}
