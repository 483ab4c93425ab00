//! HTTP API over the repurpose service
//!
//! Endpoints:
//! - `GET /health`
//! - `POST /generate`: segment, generate and optionally save
//! - `POST /ask`: single question answering
//! - `GET /posts`: saved posts, newest first

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use repurpose_core::RepurposeService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RepurposeService>,
}

/// Build the API router
pub fn router(service: Arc<RepurposeService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/generate", post(handlers::generate))
        .route("/ask", post(handlers::ask))
        .route("/posts", get(handlers::list_posts))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { service })
}

/// Bind `host:port` and serve until Ctrl-C
pub async fn serve(service: Arc<RepurposeService>, host: &str, port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    tracing::info!("Starting repurpose API on http://{addr}");
    eprintln!("Listening on http://{addr} (Ctrl-C to stop)");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}
