//! HTTP Server
//!
//! Binds the listener and serves the record API until shutdown.

use std::future::Future;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use super::handlers::{self, AppState};
use super::middleware::RequestLogLayer;
use crate::config::Config;
use crate::error::Result;
use crate::storage::RecordStore;

/// Build the API router over `state`
///
/// | Method | Path                         | Operation   |
/// |--------|------------------------------|-------------|
/// | GET    | /api/entries                 | list        |
/// | POST   | /api/entries                 | create      |
/// | GET    | /api/entries/:id             | get         |
/// | PUT    | /api/entries/:id             | update      |
/// | DELETE | /api/entries/:id             | delete      |
/// | POST   | /api/entries/generate-dummy  | bulk insert |
/// | POST   | /api/entries/truncate        | truncate    |
/// | GET    | /health                      | liveness    |
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route("/api/entries/generate-dummy", post(handlers::generate_dummy))
        .route("/api/entries/truncate", post(handlers::truncate))
        .route(
            "/api/entries/:id",
            get(handlers::get_entry)
                .put(handlers::update_entry)
                .delete(handlers::delete_entry),
        )
        .route("/health", get(handlers::health))
        .layer(RequestLogLayer::new())
        .with_state(state)
}

/// HTTP server for RowKV
pub struct Server {
    config: Config,
    state: AppState,
}

impl Server {
    /// Create a new server with the given config and store
    pub fn new(config: Config, store: RecordStore) -> Self {
        let state = AppState {
            store,
            bulk_count: config.bulk_count,
        };
        Self { config, state }
    }

    /// Router serving this server's state
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Serve until Ctrl+C
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(&self.config.listen_addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped accepting connections");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating shutdown..."),
        Err(e) => tracing::error!("Failed to listen for Ctrl+C: {}", e),
    }
}
