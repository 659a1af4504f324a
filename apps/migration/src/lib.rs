//! Schema migrations for the blog database.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_posts;
mod m20250101_000002_create_comments;
mod m20250101_000003_add_likes_to_posts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_posts::Migration),
            Box::new(m20250101_000002_create_comments::Migration),
            Box::new(m20250101_000003_add_likes_to_posts::Migration),
        ]
    }
}
