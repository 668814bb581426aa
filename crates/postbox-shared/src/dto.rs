//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Client-side shape of a post submission, sent as JSON or as an urlencoded
/// form.
///
/// The server does not deserialize into this type. It validates the raw
/// fields so that every field problem is reported at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub price: i64,
}

/// A stored post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub price: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub storage: String,
}
