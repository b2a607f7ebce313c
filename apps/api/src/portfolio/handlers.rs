//! Axum route handler for portfolio generation.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use crate::analysis::handlers::CV_FIELD;
use crate::extraction::{read_form, UploadError};
use crate::portfolio::{PipelineFailure, PortfolioPipeline};
use crate::state::AppState;

/// Optional multipart field selecting which generated template to package.
pub const TEMPLATE_FIELD: &str = "template";

/// Number of progress events the run emitted.
pub const STEPS_HEADER: HeaderName = HeaderName::from_static("x-folio-steps");

/// Name of the packaged design.
pub const TEMPLATE_HEADER: HeaderName = HeaderName::from_static("x-folio-template");

/// How many designs the model produced; valid `template` values are below it.
pub const TEMPLATES_AVAILABLE_HEADER: HeaderName =
    HeaderName::from_static("x-folio-templates-available");

fn failure_response(failure: PipelineFailure) -> Response {
    let status = if failure.step == 1 {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!("Portfolio generation failed at step {}: {}", failure.step, failure.error);
    (status, Json(failure)).into_response()
}

/// POST /api/portfolio/generate
///
/// Multipart body: `cv` (PDF) and optional `template` (zero-based index of
/// the generated design). Responds with the site as `application/zip`, or
/// `{success: false, error, step}` naming the step that failed.
pub async fn handle_generate_portfolio(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let form = match read_form(multipart, CV_FIELD).await {
        Ok(form) => form,
        Err(e) => return failure_response(PipelineFailure::at(1, e)),
    };
    let Some(file) = form.file else {
        return failure_response(PipelineFailure::at(1, UploadError::Missing));
    };
    let template_index = match form.fields.get(TEMPLATE_FIELD).map(|v| v.trim().parse::<usize>()) {
        None => 0,
        Some(Ok(index)) => index,
        Some(Err(_)) => {
            return failure_response(PipelineFailure::at(
                1,
                "Field 'template' must be a non-negative integer",
            ))
        }
    };

    let pipeline = PortfolioPipeline::new(
        &state.extractor,
        state.llm.as_ref(),
        &state.config.upload_dir,
        state.config.max_upload_bytes,
    );

    let mut events = 0usize;
    let result = pipeline
        .run(&file, template_index, |progress| {
            events += 1;
            info!(
                step = progress.step,
                total_steps = progress.total_steps,
                progress = progress.progress,
                "{}",
                progress.message
            );
        })
        .await;

    match result {
        Ok(output) => {
            let disposition = format!("attachment; filename=\"{}\"", output.file_name);
            (
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static("application/zip")),
                    (
                        header::CONTENT_DISPOSITION,
                        HeaderValue::from_str(&disposition)
                            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
                    ),
                    (STEPS_HEADER, HeaderValue::from(events)),
                    (
                        TEMPLATE_HEADER,
                        HeaderValue::from_str(&output.template_name)
                            .unwrap_or_else(|_| HeaderValue::from_static("custom")),
                    ),
                    (
                        TEMPLATES_AVAILABLE_HEADER,
                        HeaderValue::from(output.templates_available),
                    ),
                ],
                output.archive,
            )
                .into_response()
        }
        Err(failure) => failure_response(failure),
    }
}
