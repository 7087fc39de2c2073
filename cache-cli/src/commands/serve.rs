//! HTTP server command
//!
//! Connects to PostgreSQL (or an in-memory store), applies migrations and
//! serves the locations/items API until Ctrl+C or SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cache_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use cache_server::db::{create_pool_with_options, migrations, MemoryStore};
use cache_server::http::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (`host:port`, or `:port` for all interfaces)
    #[arg(long, short = 'l', env = "LISTEN_ADDR", default_value = "127.0.0.1:19970")]
    pub listen: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Directory with a front-end to serve at `/`
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Maximum connections in the database pool
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Do not apply pending migrations at startup
    #[arg(long)]
    pub skip_migrations: bool,

    /// Keep data in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let state = if args.in_memory {
        tracing::warn!("Using in-memory store; data will not persist");
        AppState::in_memory(MemoryStore::new())
    } else {
        let database_url = args
            .database_url
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        let pool = create_pool_with_options(&database_url, args.max_connections)
            .await
            .context("Failed to create database pool")?;

        if args.skip_migrations {
            tracing::info!("Skipping migrations");
        } else {
            migrations::run(&pool)
                .await
                .context("Failed to apply migrations")?;
        }

        AppState::postgres(pool)
    };

    tracing::info!("Starting cache server on {}", args.listen);

    let config = ServerConfig {
        bind_addr: args.listen,
        static_dir: args.static_dir,
    };

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
