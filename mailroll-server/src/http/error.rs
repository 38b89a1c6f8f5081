//! API error types with IntoResponse
//!
//! Storage faults are logged and returned as a generic 500; the cause
//! never reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// Body returned with 409 on a duplicate name.
pub const CONFLICT_MESSAGE: &str = "Email already registered";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Row does not exist (404, empty body)
    NotFound { id: i32 },

    /// Name already registered (409)
    Conflict { name: String },

    /// Storage probe failed (503)
    ServiceUnavailable,

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound { id } => {
                tracing::debug!(id, "email not found");
                StatusCode::NOT_FOUND.into_response()
            }
            Self::Conflict { name } => {
                tracing::warn!(%name, "rejected duplicate email");
                (StatusCode::CONFLICT, Json(CONFLICT_MESSAGE)).into_response()
            }
            Self::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Cannot connect to database",
            )
                .into_response(),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { id } => Self::NotFound { id },
            DbError::Conflict { name } => Self::Conflict { name },
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_is_404_with_empty_body() {
        let response = ApiError::NotFound { id: 3 }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn conflict_is_409_with_message() {
        let response = ApiError::Conflict {
            name: "a@x.com".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#""Email already registered""#);
    }

    #[tokio::test]
    async fn unavailable_is_503() {
        let response = ApiError::ServiceUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn storage_fault_is_500_without_details() {
        let response = ApiError::from(DbError::Unavailable).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!String::from_utf8_lossy(&body).contains("storage"));
    }

    #[test]
    fn db_errors_map_to_api_errors() {
        assert!(matches!(
            ApiError::from(DbError::NotFound { id: 1 }),
            ApiError::NotFound { id: 1 }
        ));
        assert!(matches!(
            ApiError::from(DbError::Conflict { name: "a".into() }),
            ApiError::Conflict { .. }
        ));
    }
}
