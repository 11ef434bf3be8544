mod analysis;
mod autocomplete;
mod config;
mod errors;
mod export;
mod i18n;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::autocomplete::AutocompleteClient;
use crate::config::Config;
use crate::export::{HttpPdfRenderer, NoRenderer, PdfRenderer};
use crate::llm_client::{AnthropicClient, ChatCompletion, Disabled};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::storage::FileStorage;
use crate::store::CvStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_name, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CVForge API v{}", env!("CARGO_PKG_VERSION"));

    // Open the document store over single-key file storage
    let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
    let store = CvStore::open(
        storage,
        Duration::from_millis(config.autosave_debounce_ms),
    );
    info!("CV store opened (data dir: {})", config.data_dir.display());

    // Initialize the LLM backend; absence of a key is a degraded mode, not an error
    let llm: Arc<dyn ChatCompletion> = match &config.anthropic_api_key {
        Some(api_key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(AnthropicClient::new(api_key.clone()))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set — analysis and autocompletion run on local fallbacks");
            Arc::new(Disabled)
        }
    };

    // Initialize the PDF renderer collaborator
    let renderer: Arc<dyn PdfRenderer> = match &config.pdf_renderer_url {
        Some(endpoint) => {
            info!("PDF renderer configured: {endpoint}");
            Arc::new(HttpPdfRenderer::new(endpoint.clone()))
        }
        None => {
            warn!("PDF_RENDERER_URL not set — export requests will be rejected");
            Arc::new(NoRenderer)
        }
    };

    // Build app state
    let state = AppState {
        store: store.clone(),
        llm,
        autocomplete: Arc::new(AutocompleteClient::new()),
        renderer,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict to the UI origin once it settles

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Teardown must not drop the last edit: flush a final synchronous save.
    store.flush();
    info!("Final state flushed, shutting down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
    }
}
