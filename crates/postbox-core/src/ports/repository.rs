use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Post repository - the data store behind post creation.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post and return it with its generated ID and timestamps.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepoError>;
}
