//! HTTP server command
//!
//! Builds the service configuration once from flags and environment, then
//! hands it to the server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use mailroll_server::config::{parse_origins, DEFAULT_MAX_CONNECTIONS};
use mailroll_server::db::pool::create_lazy_pool;
use mailroll_server::{run_server, EmailRepo, ServiceConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Comma-separated CORS allow-list (replaces the built-in origins)
    #[arg(long, env = "ALLOWED_ORIGINS")]
    pub allowed_origins: Option<String>,

    /// Serve Swagger UI and the OpenAPI document
    #[arg(long, env = "API_DOCS", default_value_t = true, action = ArgAction::Set)]
    pub api_docs: bool,
}

impl ServeArgs {
    fn into_config(self) -> Result<ServiceConfig> {
        let mut config = ServiceConfig::new(self.db.resolve()?)
            .with_bind_addr(self.bind)
            .with_max_connections(self.max_connections)
            .with_api_docs(self.api_docs);

        if let Some(raw) = self.allowed_origins.as_deref() {
            let origins = parse_origins(raw).context("Invalid ALLOWED_ORIGINS")?;
            config = config.with_allowed_origins(origins);
        }
        Ok(config)
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.into_config()?;

    tracing::info!("Starting mailroll server on {}", config.bind_addr);

    let pool = create_lazy_pool(&config.database_url, config.max_connections)
        .context("Failed to create database pool")?;

    // Run server (blocks until shutdown)
    run_server(Arc::new(EmailRepo::new(pool)), config)
        .await
        .context("Server error")?;

    Ok(())
}
