//! Studio - an AI website builder shell.
//!
//! This is the main entry point for the builder web server.
//! The application is organized into the following modules:
//!
//! - `config`: Environment-driven settings
//! - `auth`: Session resolution against the identity endpoint
//! - `preview`: Navigation and attribution rewriting for the preview iframe
//! - `editor`: Editor state, history and the local stash
//! - `dialogs`: Deploy, import, upgrade and login flows
//! - `store`: Project persistence capability
//! - `templates`: HTML/CSS/JS templates and rendering
//! - `handlers`: HTTP route handlers

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

use studio::{config::Config, handlers, AppState};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studio=info")),
        )
        .init();

    let config = Config::from_env()?;
    let bind = config.bind;
    let public_dir = config.public_dir.clone();
    let live_store = config.live_store;
    let api_base = config.api_base.to_string();
    let state = Arc::new(AppState::from_config(config)?);

    let app = Router::new()
        // Page
        .route("/", get(handlers::index))
        // Session
        .route("/api/me", get(handlers::me))
        .route("/api/login", post(handlers::login))
        // Preview
        .route("/api/preview", post(handlers::preview))
        .route("/api/default", get(handlers::default_html))
        .route("/api/models", get(handlers::models))
        .route("/api/models/route", get(handlers::model_route))
        // Workspace
        .route("/api/history", get(handlers::history))
        .route("/api/history/restore", post(handlers::restore_history))
        .route("/api/reset", post(handlers::reset))
        .route("/api/device", post(handlers::set_device))
        .route("/api/refresh", get(handlers::refresh))
        // Dialogs
        .route("/api/projects", post(handlers::create_project))
        .route("/api/projects/import", post(handlers::import_project))
        .route("/api/pro", post(handlers::upgrade))
        // Static assets
        .nest_service("/public", ServeDir::new(&public_dir))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;

    info!("Studio running at http://{}", bind);
    info!(api_base = %api_base, public_dir = %public_dir.display(), "backend configured");
    if live_store {
        info!("Project store: LIVE");
    } else {
        info!("Project store: coming soon (set STUDIO_LIVE_STORE=true to enable)");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
