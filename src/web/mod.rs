//! Web surface - HTML journal pages and JSON API
//!
//! Provides:
//! - The journal page with mood form, recommendation, timeline and leaderboard
//! - The puzzle page whose completion counts as a daily check-in
//! - A JSON API mirroring the same operations for scripted clients

pub mod api;
pub mod error;
pub mod routes;
pub mod views;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;

use crate::app::App;

/// Application state shared across handlers
pub type SharedState = Arc<App>;

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // Pages
        .route("/", get(routes::index))
        .route("/analyze", post(routes::analyze))
        .route("/puzzle", get(routes::puzzle))
        .route("/puzzle_played", post(routes::puzzle_played))
        .route("/static/style.css", get(routes::stylesheet))
        // JSON API
        .nest("/api", api::router())
        // Health check
        .route("/health", get(routes::health))
        .with_state(state)
}

/// Bind to the configured address and serve until the process is stopped.
pub async fn serve(app: App) -> Result<()> {
    let addr = app.config.bind;
    let router = create_router(Arc::new(app));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("FeelBuddy listening on http://{addr}");

    axum::serve(listener, router).await.context("Server error")?;
    Ok(())
}
