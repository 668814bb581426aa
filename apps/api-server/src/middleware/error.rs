//! Error handling - maps failures onto `{status: false, ...}` responses.

use std::fmt;
use std::panic::Location;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use postbox_core::{DomainError, ValidationError};
use postbox_shared::ErrorResponse;

/// Application-level error type rendered as an [`ErrorResponse`].
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Validation(ValidationError),
    Storage {
        message: String,
        location: &'static Location<'static>,
    },
    Internal {
        message: String,
        location: &'static Location<'static>,
    },
}

impl AppError {
    /// Unexpected failure, tagged with the caller's source location.
    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
            location: Location::caller(),
        }
    }

    /// Source line reported to clients; only exposed in debug builds.
    fn reported_line(location: &Location<'_>) -> Option<u32> {
        cfg!(debug_assertions).then(|| location.line())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation(err) => write!(f, "Validation errors: {}", err),
            AppError::Storage { message, .. } => write!(f, "Storage error: {}", message),
            AppError::Internal { message, .. } => write!(f, "Internal error: {}", message),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) | AppError::BadRequest(detail) => {
                ErrorResponse::new(detail.clone())
            }
            AppError::Validation(err) => {
                ErrorResponse::new(err.summary()).with_errors(err.field_messages())
            }
            AppError::Storage { message, location } | AppError::Internal { message, location } => {
                tracing::error!(
                    file = location.file(),
                    line = location.line(),
                    "Request failed: {}",
                    message
                );
                let response = ErrorResponse::new(message.clone());
                match Self::reported_line(location) {
                    Some(line) => response.with_line(line),
                    None => response,
                }
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    #[track_caller]
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(err) => AppError::Validation(err),
            storage @ DomainError::Storage(_) => AppError::Storage {
                message: storage.to_string(),
                location: Location::caller(),
            },
            DomainError::Internal(msg) => AppError::internal(msg),
        }
    }
}

/// Render JSON extractor failures (malformed body, wrong content type) in the
/// standard envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Query string rejection handler, same envelope as [`json_error_handler`].
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use postbox_core::error::RepoError;
    use postbox_core::validation::validate_new_post;
    use serde_json::{Value, json};

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_validation_maps_to_unprocessable() {
        let validation = validate_new_post(&serde_json::Map::new()).unwrap_err();

        let (status, body) = body_of(AppError::from(DomainError::from(validation))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], json!(false));
        assert_eq!(
            body["message"],
            json!("The title field is required. (and 2 more errors)")
        );
        assert_eq!(body["errors"]["price"], json!(["The price field is required."]));
        assert!(body.get("line").is_none());
    }

    #[actix_web::test]
    async fn test_storage_maps_to_server_error() {
        let err = DomainError::Storage(RepoError::Query("relation \"posts\" does not exist".into()));

        let (status, body) = body_of(AppError::from(err)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], json!(false));
        assert_eq!(
            body["message"],
            json!("Failed to store post: Query execution failed: relation \"posts\" does not exist")
        );
        assert_eq!(body.get("line").is_some(), cfg!(debug_assertions));
    }

    #[test]
    fn test_internal_records_caller_location() {
        let line = line!() + 1;
        let err = AppError::internal("boom");

        match err {
            AppError::Internal { location, .. } => {
                assert_eq!(location.line(), line);
                assert!(location.file().ends_with("error.rs"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[actix_web::test]
    async fn test_bad_request_has_plain_envelope() {
        let (status, body) = body_of(AppError::BadRequest("Json deserialize error".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"status": false, "message": "Json deserialize error"})
        );
    }
}
