//! Axum server setup
//!
//! Server skeleton with:
//! - Injected repositories (PostgreSQL or in-memory)
//! - Optional static front-end served as the fallback
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::{ItemRepo, LocationRepo, MemoryStore, PgItemRepo, PgLocationRepo};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:19970).
    ///
    /// Any `host:port` string; `:port` binds all interfaces.
    pub bind_addr: String,

    /// Directory served at `/` for paths no API route matches
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:19970".to_string(),
            static_dir: None,
        }
    }
}

/// Shared application state
///
/// Handlers only see the repository traits.
#[derive(Clone)]
pub struct AppState {
    pub locations: Arc<dyn LocationRepo>,
    pub items: Arc<dyn ItemRepo>,
}

impl AppState {
    pub fn new(locations: Arc<dyn LocationRepo>, items: Arc<dyn ItemRepo>) -> Self {
        Self { locations, items }
    }

    /// State backed by a PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgLocationRepo::new(pool.clone())),
            Arc::new(PgItemRepo::new(pool)),
        )
    }

    /// State backed by an in-process store.
    pub fn in_memory(store: MemoryStore) -> Self {
        Self::new(Arc::new(store.clone()), Arc::new(store))
    }
}

/// Expand a bare `:port` to `0.0.0.0:port`; other values pass through.
pub fn listen_addr(addr: &str) -> String {
    match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => addr.to_string(),
    }
}

/// Build the application router.
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .merge(routes::health::router())
        .merge(routes::locations::router())
        .merge(routes::items::router());

    if let Some(dir) = static_dir {
        tracing::info!(static_dir = %dir.display(), "Serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// run_server(AppState::postgres(pool), ServerConfig::default()).await?;
/// ```
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, config.static_dir);

    let bind_addr = listen_addr(&config.bind_addr);
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("failed to install SIGTERM handler: {}", err);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:19970");
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn bare_port_binds_all_interfaces() {
        assert_eq!(listen_addr(":8080"), "0.0.0.0:8080");
        assert_eq!(listen_addr("localhost:19970"), "localhost:19970");
        assert_eq!(listen_addr("127.0.0.1:19970"), "127.0.0.1:19970");
    }

    #[tokio::test]
    async fn host_names_and_bare_ports_bind() {
        for addr in ["localhost:0", ":0"] {
            let listener = TcpListener::bind(listen_addr(addr)).await.unwrap();
            assert_ne!(listener.local_addr().unwrap().port(), 0, "{addr}");
        }
    }

    #[tokio::test]
    async fn static_dir_is_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>cache</h1>").unwrap();

        let app = build_router(
            AppState::in_memory(MemoryStore::new()),
            Some(dir.path().to_path_buf()),
        );

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<h1>cache</h1>");

        // API routes still win over the fallback
        let response = app
            .oneshot(Request::builder().uri("/locations").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"[]");
    }

    #[tokio::test]
    async fn unknown_path_without_static_dir_is_404() {
        let app = build_router(AppState::in_memory(MemoryStore::new()), None);
        let response = app
            .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
