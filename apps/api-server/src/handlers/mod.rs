//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpRequest, web};

use crate::middleware::error::{AppError, AppResult, json_error_handler, query_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::resource("/posts")
                        .route(web::get().to(posts::index))
                        .route(web::post().to(posts::store)),
                ),
        );
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> AppResult<actix_web::HttpResponse> {
    Err(AppError::NotFound(format!(
        "No route for {} {}",
        req.method(),
        req.path()
    )))
}
