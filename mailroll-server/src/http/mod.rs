//! HTTP server layer
//!
//! Axum server with:
//! - CORS (fixed origin allow-list)
//! - Request tracing
//! - Graceful shutdown
//! - Swagger UI / OpenAPI document (optional)

pub mod docs;
pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerError};
