//! Health check endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /health - liveness for the deployment platform
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Storage reachable", body = String),
        (status = 503, description = "Storage unreachable", body = String)
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    if state.emails.can_connect().await {
        (StatusCode::OK, "Healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Unhealthy")
    }
}

/// GET /test-connect - explicit database connectivity check
#[utoipa::path(
    get,
    path = "/test-connect",
    responses(
        (status = 200, description = "Connected", body = String),
        (status = 503, description = "Cannot connect to database", body = String)
    ),
    tag = "Health"
)]
pub async fn test_connect(State(state): State<Arc<AppState>>) -> Result<&'static str, ApiError> {
    if state.emails.can_connect().await {
        Ok("Connected to database")
    } else {
        Err(ApiError::ServiceUnavailable)
    }
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/test-connect", get(test_connect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryEmailRepo;

    #[tokio::test]
    async fn health_tracks_storage() {
        let repo = Arc::new(MemoryEmailRepo::new());
        let state = Arc::new(AppState::new(repo.clone()));

        let (status, body) = health(State(state.clone())).await;
        assert_eq!((status, body), (StatusCode::OK, "Healthy"));

        repo.set_reachable(false);
        let (status, _) = health(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
