//! Database layer - connection pool, migrations, and the email store
//!
//! # Design Principles
//!
//! - Connection pool, one connection per handler call, released on drop
//! - Every mutation commits on its own; no cross-call transactions
//! - Name uniqueness is enforced by a unique index, conflicts surface as
//!   [`DbError::Conflict`]

pub mod emails;
pub mod memory;
pub mod migrations;
pub mod pool;

use async_trait::async_trait;

use crate::models::{Email, EmailInput};

pub use emails::EmailRepo;
pub use memory::MemoryEmailRepo;
pub use pool::{create_pool, create_pool_with_options};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: email '{id}'")]
    NotFound { id: i32 },

    #[error("conflict: email '{name}' already registered")]
    Conflict { name: String },

    #[error("storage unavailable")]
    Unavailable,
}

/// Typed access to the `emails` table.
///
/// Shared across handlers as `Arc<dyn EmailStore>`.
#[async_trait]
pub trait EmailStore: Send + Sync {
    /// All rows in id order.
    async fn list(&self) -> Result<Vec<Email>, DbError>;

    /// Row by id, `None` when absent.
    async fn get(&self, id: i32) -> Result<Option<Email>, DbError>;

    async fn exists_by_name(&self, name: &str) -> Result<bool, DbError>;

    /// Insert and return the stored row with its assigned id.
    ///
    /// Fails with [`DbError::Conflict`] when storage already holds `name`.
    async fn insert(&self, input: EmailInput) -> Result<Email, DbError>;

    /// Overwrite `name` on an existing row. The id never changes.
    async fn update(&self, id: i32, name: &str) -> Result<Email, DbError>;

    async fn delete(&self, id: i32) -> Result<(), DbError>;

    /// Liveness probe against storage.
    async fn can_connect(&self) -> bool;

    /// Bring the schema up to date. Safe to run repeatedly.
    async fn apply_migrations(&self) -> Result<(), DbError>;
}
