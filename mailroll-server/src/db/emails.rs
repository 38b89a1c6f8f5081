//! Email repository backed by PostgreSQL
//!
//! - insert: relies on the unique index, maps violations to `Conflict`
//! - update/delete: single statement, zero rows means `NotFound`

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{migrations, DbError, EmailStore};
use crate::models::{Email, EmailInput};

/// Upper bound on a liveness probe, well under the pool acquire timeout.
const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// PostgreSQL email repository
#[derive(Clone)]
pub struct EmailRepo {
    pool: PgPool,
}

impl EmailRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Classify a write failure, turning unique violations into conflicts.
fn classify_write_error(err: sqlx::Error, name: &str) -> DbError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DbError::Conflict {
            name: name.to_owned(),
        },
        _ => DbError::Sqlx(err),
    }
}

#[async_trait]
impl EmailStore for EmailRepo {
    async fn list(&self) -> Result<Vec<Email>, DbError> {
        let emails = sqlx::query_as::<_, Email>("SELECT id, name FROM emails ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(emails)
    }

    async fn get(&self, id: i32) -> Result<Option<Email>, DbError> {
        let email = sqlx::query_as::<_, Email>("SELECT id, name FROM emails WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(email)
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DbError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM emails WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert(&self, input: EmailInput) -> Result<Email, DbError> {
        sqlx::query_as::<_, Email>("INSERT INTO emails (name) VALUES ($1) RETURNING id, name")
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_write_error(e, &input.name))
    }

    async fn update(&self, id: i32, name: &str) -> Result<Email, DbError> {
        sqlx::query_as::<_, Email>(
            "UPDATE emails SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, name))?
        .ok_or(DbError::NotFound { id })
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM emails WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { id });
        }
        Ok(())
    }

    async fn can_connect(&self) -> bool {
        let probe = sqlx::query("SELECT 1").execute(&self.pool);
        match tokio::time::timeout(PROBE_TIMEOUT, probe).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::warn!("Storage probe failed: {}", e);
                false
            }
            Err(_) => {
                tracing::warn!("Storage probe timed out after {:?}", PROBE_TIMEOUT);
                false
            }
        }
    }

    async fn apply_migrations(&self) -> Result<(), DbError> {
        migrations::run(&self.pool).await
    }
}
