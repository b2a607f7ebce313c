pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{analysis, auth, cv, portfolio, render};

/// Room for multipart framing on top of the largest accepted file, so
/// oversized uploads reach validation and get a proper 400.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit =
        usize::try_from(state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES).unwrap_or(usize::MAX);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/auth/me", get(auth::handle_me))
        // Upload analysis
        .route("/api/analyze-cv", post(analysis::handlers::handle_analyze_cv))
        // CV document
        .route(
            "/api/cv",
            get(cv::handlers::handle_get_cv).delete(cv::handlers::handle_reset),
        )
        .route("/api/cv/actions", post(cv::handlers::handle_dispatch))
        .route("/api/cv/load", post(cv::handlers::handle_load_extracted))
        // Built-in templates
        .route("/api/templates", get(render::handlers::handle_list_templates))
        .route("/api/cv/render/:kind", get(render::handlers::handle_render))
        .route("/api/cv/export/:kind", get(render::handlers::handle_export))
        // Portfolio generation
        .route(
            "/api/portfolio/generate",
            post(portfolio::handlers::handle_generate_portfolio),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
