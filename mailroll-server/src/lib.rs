//! mailroll-server: HTTP service for a registry of email addresses
//!
//! Exposes create/read/update/delete over a single `emails` table,
//! plus health probes, a CSV export, and generated OpenAPI docs.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, ServiceConfig};
pub use db::{DbError, EmailRepo, EmailStore, MemoryEmailRepo};
pub use http::{build_router, run_server, AppState, ServerError};
pub use models::{Email, EmailInput};
