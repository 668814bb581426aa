//! In-memory post repository - used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use postbox_core::domain::{NewPost, Post};
use postbox_core::error::RepoError;
use postbox_core::ports::PostRepository;

/// In-memory post store using a Vec behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }

    /// Snapshot of every stored post, in insertion order.
    pub async fn all(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, input: NewPost) -> Result<Post, RepoError> {
        let post = Post::new(input);
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postbox_core::validation::validate_new_post;
    use serde_json::json;

    fn new_post(price: i64) -> NewPost {
        let fields = json!({"title": "Hello", "content": "World", "price": price});
        validate_new_post(fields.as_object().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_count() {
        let repo = InMemoryPostRepository::new();
        assert!(repo.is_empty().await);

        let post = repo.insert(new_post(10)).await.unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.all().await, vec![post]);
    }

    #[tokio::test]
    async fn test_inserts_get_distinct_ids() {
        let repo = InMemoryPostRepository::new();

        let first = repo.insert(new_post(1)).await.unwrap();
        let second = repo.insert(new_post(1)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.len().await, 2);
    }
}
