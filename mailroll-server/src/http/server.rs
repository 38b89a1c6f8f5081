//! Axum server setup
//!
//! Server skeleton with:
//! - Allow-listed CORS origins
//! - Tracing middleware
//! - Migrations before the listener binds
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{docs, routes};
use crate::config::ServiceConfig;
use crate::db::{DbError, EmailStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub emails: Arc<dyn EmailStore>,
}

impl AppState {
    pub fn new(emails: Arc<dyn EmailStore>) -> Self {
        Self { emails }
    }
}

/// Build the application router with all routes.
pub fn build_router(state: AppState, config: &ServiceConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.allowed_origins.iter().cloned()))
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .merge(routes::health::router())
        .merge(routes::emails::router())
        .merge(routes::export::router());

    if config.api_docs {
        app = app.merge(docs::swagger_ui());
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// Applies migrations first; the listener is only bound once the schema
/// is current.
///
/// # Example
///
/// ```ignore
/// let pool = create_lazy_pool(&config.database_url, config.max_connections)?;
/// run_server(Arc::new(EmailRepo::new(pool)), config).await?;
/// ```
pub async fn run_server(
    emails: Arc<dyn EmailStore>,
    config: ServiceConfig,
) -> Result<(), ServerError> {
    emails.apply_migrations().await?;

    let origins: Vec<_> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.to_str().ok())
        .collect();
    tracing::info!(origins = ?origins, "CORS allow-list loaded");
    if config.api_docs {
        tracing::info!("API docs at {}", docs::SWAGGER_UI_PATH);
    }

    let app = build_router(AppState::new(emails), &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] DbError),
}
