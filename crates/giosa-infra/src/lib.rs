//! # Giosa Infrastructure
//!
//! Concrete implementations of the ports defined in `giosa-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL persistence via SeaORM
//! - `redis` - Redis pub/sub for broadcasting across instances

pub mod database;
pub mod pubsub;

// Re-exports - In-Memory
pub use database::{DatabaseConnections, InMemoryStore};
pub use pubsub::InMemoryPubSub;

// Re-exports - Redis
#[cfg(feature = "redis")]
pub use pubsub::{RedisConfig, RedisPubSub};
