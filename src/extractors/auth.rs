//! Reject unauthenticated callers before a handler runs.

use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

/// Present in a handler's arguments means the `Authorization` header passed the
/// state's `CredentialVerifier`.
#[derive(Clone, Copy, Debug)]
pub struct Authorized;

#[async_trait]
impl FromRequestParts<AppState> for Authorized {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if state.verifier.verify(credential) {
            Ok(Authorized)
        } else {
            tracing::info!(path = %parts.uri.path(), "rejected unauthorized request");
            Err(AppError::Unauthorized)
        }
    }
}
