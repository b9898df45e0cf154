//! On-demand manifest endpoint.
//!
//! `GET <api_path>` scans the photos root and answers with the manifest JSON.
//! The status is always `200 OK`: a missing directory or a scan error is a
//! `"success": false` body, which the frontend renders as an empty gallery.
//!
//! Scanning is blocking filesystem work, so each request runs [`scan::build`]
//! on tokio's blocking pool, bounded by the configured timeout. A timeout or a
//! panicked scan yields a failure manifest like any other scan error.

use crate::config::SiteConfig;
use crate::scan::{self, ScanOptions};
use crate::types::Manifest;
use axum::{Json, Router, extract::State, routing::get};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only state shared by all requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub photos_root: PathBuf,
    pub options: ScanOptions,
    pub timeout: Duration,
}

impl AppState {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            photos_root: config.photos_root.clone(),
            options: config.scan_options(),
            timeout: config.server.timeout(),
        }
    }
}

/// Router serving the manifest at `api_path`.
pub fn router(state: AppState, api_path: &str) -> Router {
    Router::new()
        .route(api_path, get(photos_handler))
        .with_state(Arc::new(state))
}

async fn photos_handler(State(state): State<Arc<AppState>>) -> Json<Manifest> {
    Json(build_with_timeout(&state).await)
}

/// Run one scan on the blocking pool, giving up after `state.timeout`.
pub async fn build_with_timeout(state: &AppState) -> Manifest {
    let root = state.photos_root.clone();
    let options = state.options.clone();
    let task = tokio::task::spawn_blocking(move || scan::build(&root, &options));

    match tokio::time::timeout(state.timeout, task).await {
        Ok(Ok(manifest)) => manifest,
        Ok(Err(join_err)) => {
            error!(error = %join_err, "photo scan task failed");
            Manifest::failure("Failed to read photos")
        }
        Err(_) => {
            warn!(timeout = ?state.timeout, "photo scan timed out");
            Manifest::failure(format!(
                "Timed out reading photos after {}s",
                state.timeout.as_secs_f32()
            ))
        }
    }
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: &SiteConfig) -> Result<(), ServeError> {
    let app = router(AppState::from_config(config), &config.server.api_path);
    let listener = TcpListener::bind(&config.server.bind).await?;

    info!(
        addr = %listener.local_addr()?,
        path = %config.server.api_path,
        root = %config.photos_root.display(),
        "serving photo manifest"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
