//! Application state - shared across all handlers.

use std::sync::Arc;

use postbox_core::PostService;
use postbox_core::ports::PostRepository;
use postbox_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use postbox_infra::{DatabaseConnections, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the application state, falling back to in-memory storage when
    /// no database is configured or reachable.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let repo = Self::build_repository(db_config).await;
        tracing::info!("Application state initialized");
        Self::with_repository(repo)
    }

    /// Build the application state around an existing repository.
    pub fn with_repository(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            posts: PostService::new(repo),
        }
    }

    #[cfg(feature = "postgres")]
    async fn build_repository(db_config: Option<&DatabaseConfig>) -> Arc<dyn PostRepository> {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryPostRepository::new());
        };

        match DatabaseConnections::init(config).await {
            Ok(connections) => Arc::new(PostgresPostRepository::new(connections.main)),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryPostRepository::new())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn build_repository(_db_config: Option<&DatabaseConfig>) -> Arc<dyn PostRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryPostRepository::new())
    }
}
