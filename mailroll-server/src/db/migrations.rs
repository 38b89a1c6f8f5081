//! Database migrations for the emails table

use sqlx::PgPool;

use super::DbError;

/// Run all migrations. Every statement is idempotent.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running email migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS emails (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Uniqueness lives in storage so concurrent creates cannot both win.
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS emails_name_key ON emails (name)")
        .execute(pool)
        .await?;

    tracing::info!("Email migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");

        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM pg_indexes WHERE indexname = 'emails_name_key')",
        )
        .fetch_one(&pool)
        .await
        .expect("query failed");
        assert!(exists);
    }
}
