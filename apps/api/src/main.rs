mod analysis;
mod auth;
mod config;
mod cv;
mod errors;
mod extraction;
mod llm_client;
mod portfolio;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{AuthProvider, LocalAuth, RemoteAuth};
use crate::config::{AuthMode, Config};
use crate::cv::CvWorkspace;
use crate::extraction::{DocumentExtractor, PdfExtractText, TesseractOcr};
use crate::llm_client::{GeminiClient, LanguageModel};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = GeminiClient::new(
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.gemini_api_key.clone(),
        config.llm_timeout_secs,
    )?;
    info!("LLM client initialized (model: {})", llm.model_name());

    // Text layer first, tesseract when the PDF is scanned
    let extractor = DocumentExtractor::new(
        Arc::new(PdfExtractText),
        Arc::new(TesseractOcr::new(
            config.tesseract_path.clone(),
            config.pdftoppm_path.clone(),
        )),
    );

    let auth: Arc<dyn AuthProvider> = match &config.auth_mode {
        AuthMode::Firebase { api_key } => Arc::new(RemoteAuth::new(api_key.clone())),
        AuthMode::Local => Arc::new(LocalAuth),
    };
    info!("Auth provider: {}", auth.name());

    tokio::fs::create_dir_all(&config.upload_dir).await?;
    info!("Uploads are staged in {}", config.upload_dir.display());

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        extractor,
        auth,
        workspace: CvWorkspace::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
