use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::config::Config;
use crate::cv::CvWorkspace;
use crate::extraction::DocumentExtractor;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Single LLM used for CV analysis and template generation.
    pub llm: Arc<dyn LanguageModel>,
    pub extractor: DocumentExtractor,
    /// Chosen once at startup from `Config::auth_mode`.
    pub auth: Arc<dyn AuthProvider>,
    /// In-memory CV documents keyed by user id. Lost on restart.
    pub workspace: CvWorkspace,
}
