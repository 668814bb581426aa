//! Health check endpoint.

use actix_web::{HttpResponse, web};
use postbox_shared::dto::HealthResponse;

use crate::state::AppState;

/// Health check endpoint - returns server and storage status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let storage = if state.posts.storage_ready().await {
        "ok"
    } else {
        "unavailable"
    };

    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        storage: storage.to_string(),
    };

    HttpResponse::Ok().json(response)
}
