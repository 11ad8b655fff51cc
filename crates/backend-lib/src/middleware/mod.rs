// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the `authd` HTTP API.
//!
//! The authentication gate runs before route handling:
//! excluded paths pass straight through; gated paths need some credential
//! (401 otherwise) that the active strategy can resolve (403 otherwise).
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use metrics::counter;
use std::sync::Arc;

use crate::auth::{credentials, policy};
use crate::error::AppError;
use crate::metrics as keys;
use crate::AppState;

#[cfg(test)]
mod tests;

/// Authentication gate middleware.
///
/// On success the resolved `User` is attached to the request extensions for
/// downstream handlers. Collaborator failures inside the strategy never
/// escape as errors; an unresolved user is simply Forbidden.
pub async fn auth_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    if !policy::require_auth(&path, &state.settings.excluded_paths) {
        return Ok(next.run(request).await);
    }

    let headers = request.headers().clone();
    let has_header = credentials::authorization_header(&headers).is_some();
    let has_cookie =
        credentials::session_cookie(&headers, state.settings.session_name.as_deref()).is_some();

    if !has_header && !has_cookie {
        counter!(keys::GATE_UNAUTHORIZED).increment(1);
        tracing::debug!(%path, "no credentials presented");
        return Err(AppError::Unauthorized);
    }

    let Some(user) = state.strategy.current_user(&headers).await else {
        counter!(keys::GATE_FORBIDDEN).increment(1);
        tracing::debug!(%path, strategy = state.strategy.name(), "credentials rejected");
        return Err(AppError::Forbidden);
    };

    tracing::debug!(%path, email = %user.email, "request authenticated");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
