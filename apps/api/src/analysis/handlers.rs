//! Axum route handlers for CV analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::analysis::{analyze_document, AnalyzeResponse};
use crate::errors::AppError;
use crate::extraction::{read_form, validate_upload, TempUpload, UploadError};
use crate::state::AppState;

/// Multipart field carrying the PDF.
pub const CV_FIELD: &str = "cv";

/// POST /api/analyze-cv
///
/// Validates the upload before touching it, writes it to the upload
/// directory for the duration of the request, and returns `{parsed, excerpt}`.
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = read_form(multipart, CV_FIELD).await?;
    let file = form.file.ok_or(UploadError::Missing)?;

    validate_upload(
        file.content_type.as_deref(),
        file.bytes.len() as u64,
        state.config.max_upload_bytes,
    )?;

    info!(
        "Analyzing upload {:?} ({} bytes)",
        file.file_name.as_deref().unwrap_or("unnamed"),
        file.bytes.len()
    );

    let upload = TempUpload::persist(&state.config.upload_dir, &file.bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to save upload: {e}")))?;

    let response = analyze_document(&state.extractor, state.llm.as_ref(), upload.path()).await?;
    Ok(Json(response))
}
