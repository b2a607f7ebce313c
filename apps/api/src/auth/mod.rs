//! Authentication.
//!
//! One `AuthProvider` is chosen in `main` from `Config::auth_mode` and shared
//! through `AppState`. Handlers receive the resolved caller via the
//! `AuthUser` extractor.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::errors::AppError;
use crate::state::AppState;

pub mod firebase;
pub mod local;

pub use firebase::RemoteAuth;
pub use local::LocalAuth;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("auth provider error: {0}")]
    Provider(String),
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub provider: &'static str,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolves the caller from an optional bearer token.
    async fn authenticate(&self, token: Option<&str>) -> Result<AuthUser, AuthError>;

    fn name(&self) -> &'static str;
}

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts);
        Ok(state.auth.authenticate(token).await?)
    }
}

/// GET /api/auth/me
pub async fn handle_me(user: AuthUser) -> Json<AuthUser> {
    Json(user)
}
