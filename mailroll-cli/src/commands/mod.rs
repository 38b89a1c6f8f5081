pub mod migrate;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;

/// Connection string variable used by older deployments.
const LEGACY_CONNECTION_VAR: &str = "ConnectionStrings__DefaultConnection";

/// Database connection arguments shared by every command
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl DatabaseArgs {
    /// Resolve the connection string from the flag, `DATABASE_URL`, or the
    /// legacy `ConnectionStrings__DefaultConnection` variable.
    pub fn resolve(self) -> Result<String> {
        self.database_url
            .or_else(|| std::env::var(LEGACY_CONNECTION_VAR).ok())
            .filter(|url| !url.trim().is_empty())
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")
    }
}
