use postbox_core::domain::NewPost;
use postbox_core::error::RepoError;
use postbox_core::ports::PostRepository;
use postbox_core::validation::validate_new_post;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};
use serde_json::json;

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn new_post() -> NewPost {
    let fields = json!({"title": "Hello", "content": "World", "price": 10});
    validate_new_post(fields.as_object().unwrap()).unwrap()
}

fn repo_failing_with(err: DbErr) -> PostgresPostRepository {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![err])
        .into_connection();
    PostgresPostRepository::new(db)
}

#[tokio::test]
async fn test_insert_post_returns_stored_row() {
    let post_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    // Postgres inserts use RETURNING, so the mock answers with a query result
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            title: "Hello".to_owned(),
            content: "World".to_owned(),
            price: 10,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo.insert(new_post()).await.unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Hello");
    assert_eq!(post.content, "World");
    assert_eq!(post.price, 10);
}

#[tokio::test]
async fn test_insert_maps_query_failure() {
    let repo = repo_failing_with(DbErr::Custom("syntax error".to_owned()));

    let err = repo.insert(new_post()).await.unwrap_err();

    assert!(matches!(err, RepoError::Query(msg) if msg.contains("syntax error")));
}

#[tokio::test]
async fn test_insert_maps_connection_failure() {
    let repo = repo_failing_with(DbErr::Conn(RuntimeErr::Internal(
        "connection refused".to_owned(),
    )));

    let err = repo.insert(new_post()).await.unwrap_err();

    assert!(matches!(err, RepoError::Connection(_)));
}

#[tokio::test]
async fn test_insert_maps_duplicate_key() {
    let repo = repo_failing_with(DbErr::Custom(
        "duplicate key value violates unique constraint \"posts_pkey\"".to_owned(),
    ));

    let err = repo.insert(new_post()).await.unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
}
