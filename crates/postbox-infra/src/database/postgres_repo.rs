//! PostgreSQL post repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DbConn};

use postbox_core::domain::{NewPost, Post};
use postbox_core::error::RepoError;
use postbox_core::ports::PostRepository;

use super::entity::post;
use super::error_mapping::map_db_err;

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, input: NewPost) -> Result<Post, RepoError> {
        let active_model: post::ActiveModel = Post::new(input).into();
        tracing::debug!("Inserting post");

        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.db.ping().await.map_err(map_db_err)
    }
}
