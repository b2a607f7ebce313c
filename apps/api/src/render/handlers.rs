//! Axum route handlers for the built-in templates.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::portfolio::{package_site, slugify, SiteSource};
use crate::render::{render, CssMode, TemplateKind};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateKind,
    pub description: &'static str,
}

/// GET /api/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateInfo>> {
    Json(
        TemplateKind::ALL
            .into_iter()
            .map(|id| TemplateInfo {
                id,
                description: id.description(),
            })
            .collect(),
    )
}

/// GET /api/cv/render/:kind
///
/// Preview of the caller's CV with the stylesheet inlined.
pub async fn handle_render(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
) -> Result<Html<String>, AppError> {
    let kind: TemplateKind = kind.parse()?;
    let cv = state.workspace.snapshot(&user.uid).await;
    let page = render(kind, &cv, CssMode::Inline)?;
    Ok(Html(page.html))
}

/// GET /api/cv/export/:kind
///
/// Static site for the caller's CV rendered with a built-in template.
pub async fn handle_export(
    State(state): State<AppState>,
    user: AuthUser,
    Path(kind): Path<String>,
) -> Result<Response, AppError> {
    let kind: TemplateKind = kind.parse()?;
    let cv = state.workspace.snapshot(&user.uid).await;
    let page = render(kind, &cv, CssMode::Linked)?;

    let archive = package_site(
        SiteSource {
            template_name: kind.as_str(),
            html: &page.html,
            css: &page.css,
            js: None,
        },
        &cv,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to package site: {e}")))?;

    let disposition = format!(
        "attachment; filename=\"{}-{}.zip\"",
        slugify(cv.display_name()),
        kind
    );
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/zip")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
            ),
        ],
        archive,
    )
        .into_response())
}
