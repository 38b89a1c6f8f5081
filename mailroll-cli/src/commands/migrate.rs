//! Apply schema migrations and exit

use anyhow::{Context, Result};
use clap::Parser;

use mailroll_server::db::create_pool;
use mailroll_server::{EmailRepo, EmailStore};

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args.db.resolve()?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    EmailRepo::new(pool)
        .apply_migrations()
        .await
        .context("Migration failed")?;

    Ok(())
}
