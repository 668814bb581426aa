use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a persisted title/content/price submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post from validated input, with generated ID and timestamps.
    pub fn new(input: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            price: input.price,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated input for creating a post.
///
/// Only obtainable through [`crate::validation::validate_new_post`], so holding
/// one means every rule in the post rule table has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    price: i64,
}

impl NewPost {
    pub(crate) fn new(title: String, content: String, price: i64) -> Self {
        Self {
            title,
            content,
            price,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn price(&self) -> i64 {
        self.price
    }
}
