use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tracing_subscriber::EnvFilter;

use paperlens_core::{Config, PdfBackend};
use paperlens_pdf_mupdf::MupdfBackend;

mod handlers;
mod state;
mod template;
mod upload;

use state::AppState;

/// Allow uploads of papers up to 100MB.
const BODY_LIMIT: usize = 100 * 1024 * 1024;

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/upload", post(handlers::upload::upload))
        .route("/reset", post(handlers::reset::reset))
        .route("/api/state", get(handlers::state::snapshot))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("paperlens_core=info,paperlens_web=info")
        }))
        .init();

    let config = Config::load();
    if config.api_key.is_none() {
        tracing::warn!("no API key configured; analyses will fail until API_KEY is set");
    }
    tracing::debug!(?config, "resolved configuration");

    let backend: Arc<dyn PdfBackend> = Arc::new(MupdfBackend::new());
    let state = Arc::new(AppState::new(config.build_controller(backend)));

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
