//! Post creation service.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::{NewPost, Post};
use crate::error::DomainError;
use crate::ports::PostRepository;
use crate::validation::validate_new_post;

/// Creates posts through a [`PostRepository`].
///
/// Storage failures are returned as-is; nothing is retried.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Persist an already validated post.
    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        let post = self.repo.insert(input).await?;
        tracing::info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    /// Validate a raw field mapping and persist the result.
    ///
    /// The repository is not touched when validation fails.
    pub async fn create_from_fields(&self, fields: &Map<String, Value>) -> Result<Post, DomainError> {
        let input = validate_new_post(fields).inspect_err(|e| {
            tracing::debug!(violations = e.violations().len(), "Post submission rejected");
        })?;
        self.create(input).await
    }

    /// Check that the underlying store is reachable.
    pub async fn storage_ready(&self) -> bool {
        self.repo.ping().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRepository {
        inserted: Mutex<Vec<Post>>,
        fail_with: Option<&'static str>,
    }

    #[async_trait]
    impl PostRepository for RecordingRepository {
        async fn insert(&self, post: NewPost) -> Result<Post, RepoError> {
            if let Some(msg) = self.fail_with {
                return Err(RepoError::Connection(msg.to_string()));
            }
            let post = Post::new(post);
            self.inserted.lock().unwrap().push(post.clone());
            Ok(post)
        }

        async fn ping(&self) -> Result<(), RepoError> {
            match self.fail_with {
                Some(msg) => Err(RepoError::Connection(msg.to_string())),
                None => Ok(()),
            }
        }
    }

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_create_persists_exact_values() {
        let repo = Arc::new(RecordingRepository::default());
        let service = PostService::new(repo.clone());

        let post = service
            .create_from_fields(&fields(json!({"title": "Hello", "content": "World", "price": 10})))
            .await
            .unwrap();

        let stored = repo.inserted.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], post);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
        assert_eq!(post.price, 10);
    }

    #[tokio::test]
    async fn test_same_payload_twice_creates_two_posts() {
        let repo = Arc::new(RecordingRepository::default());
        let service = PostService::new(repo.clone());
        let input = fields(json!({"title": "Hello", "content": "World", "price": 10}));

        let first = service.create_from_fields(&input).await.unwrap();
        let second = service.create_from_fields(&input).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.inserted.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_submission_skips_repository() {
        let repo = Arc::new(RecordingRepository::default());
        let service = PostService::new(repo.clone());

        let err = service
            .create_from_fields(&fields(json!({"title": "Hello", "content": "World", "price": "abc"})))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert!(repo.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let repo = Arc::new(RecordingRepository {
            fail_with: Some("connection reset"),
            ..Default::default()
        });
        let service = PostService::new(repo);

        let err = service
            .create_from_fields(&fields(json!({"title": "Hello", "content": "World", "price": 10})))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Storage(RepoError::Connection(_))));
        assert_eq!(
            err.to_string(),
            "Failed to store post: Database connection failed: connection reset"
        );
        assert!(!service.storage_ready().await);
    }
}
