use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::database::entity::{comment, post};
use crate::database::postgres_repo::{PostgresCommentRepository, PostgresPostRepository};
use giosa_core::domain::{Comment, Post};
use giosa_core::error::RepoError;
use giosa_core::ports::{BaseRepository, CommentRepository, PostRepository};

fn post_model(id: Uuid, title: &str, likes: i32) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: title.to_owned(),
        content: "Content long enough".to_owned(),
        published: true,
        likes,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, sea_orm::Value> {
    BTreeMap::from([("num_items", n.into())])
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, "Test Post", 0)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
}

#[tokio::test]
async fn test_search_lowercases_both_sides() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, "Rust Tips", 0)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.list(Some("RUST")).await.unwrap();
    assert_eq!(posts.len(), 1);

    let log = repo.db.into_transaction_log();
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("LOWER"));
    assert!(sql.contains("%rust%"));
    assert!(sql.contains("ORDER BY"));
}

#[tokio::test]
async fn test_increment_likes_returns_stored_count() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![post_model(post_id, "Liked", 6)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo.increment_likes(post_id).await.unwrap();
    assert_eq!(post.likes, 6);

    let log = repo.db.into_transaction_log();
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("UPDATE"));
    assert!(sql.contains(" + "));
}

#[tokio::test]
async fn test_increment_likes_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo.increment_likes(Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_comment_counts_and_listing() {
    let post_id = Uuid::new_v4();
    let now = Utc::now();
    let model = comment::Model {
        id: Uuid::new_v4(),
        post_id,
        author_name: "Ana".to_owned(),
        content: "Great read".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model]])
        .append_query_results([vec![count_row(1)]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comments: Vec<Comment> = repo.list_for_post(post_id).await.unwrap();
    assert_eq!(comments[0].author_name, "Ana");
    assert_eq!(repo.count_for_post(post_id).await.unwrap(), 1);
}
