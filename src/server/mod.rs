// Secret Stress - HTTP Server Module
// Daemon mode exposing crisis assessment and the submission store

mod handlers;

pub use handlers::{create_router, health_check, metrics_endpoint, AppError};

use anyhow::{anyhow, Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::crisis::CrisisDetector;
use crate::errors::wrap_error_with_suggestion;
use crate::metrics::ServiceMetrics;
use crate::storage::SubmissionStore;

/// Shared server state
pub struct CrisisServer {
    /// Keyword registry (read for evaluation, write only to append keywords)
    detector: Arc<RwLock<CrisisDetector>>,
    store: Arc<SubmissionStore>,
    metrics: ServiceMetrics,
    config: ServerConfig,
    started_at: Instant,
}

impl CrisisServer {
    pub fn new(config: ServerConfig, detector: CrisisDetector, store: SubmissionStore) -> Result<Self> {
        Ok(Self {
            detector: Arc::new(RwLock::new(detector)),
            store: Arc::new(store),
            metrics: ServiceMetrics::new()?,
            config,
            started_at: Instant::now(),
        })
    }

    /// Full application router with tracing and CORS layers
    pub fn into_router(self) -> axum::Router {
        create_router(Arc::new(self))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind and serve until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        let app = self.into_router();

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            anyhow!(wrap_error_with_suggestion(
                format!("Failed to bind {}: {}", addr, e),
                "Another daemon may already be listening; pick a different address with --bind",
            ))
        })?;

        tracing::info!("Starting Secret Stress server on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }

    pub fn detector(&self) -> &Arc<RwLock<CrisisDetector>> {
        &self.detector
    }

    pub fn store(&self) -> &Arc<SubmissionStore> {
        &self.store
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
