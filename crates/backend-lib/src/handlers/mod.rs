// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers for the account endpoints.
//!
//! The account routes sit in the default excluded set and enforce their own
//! access rules, mirroring the gate taxonomy: login failures are 401,
//! session/reset failures are 403.
use axum::{extract::State, response::Redirect, Extension, Form, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::error::AppError;
use crate::AppState;
use authd_common::{
    LoginRequest, MessageResponse, ProfileResponse, RegisterRequest, ResetRequest,
    UpdatePasswordRequest, User,
};

/// `GET /`
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Bienvenue" }))
}

/// `GET /api/v1/status`
pub async fn status() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "OK" }))
}

/// `GET /api/v1/me` — the identity the gate attached to the request.
pub async fn me(Extension(user): Extension<User>) -> Json<ProfileResponse> {
    Json(ProfileResponse { email: user.email })
}

/// `POST /users` — register a new user.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(req): Form<RegisterRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = state.accounts.register(&req.email, &req.password).await?;
    Ok(Json(MessageResponse::new(user.email, "user created")))
}

/// `POST /sessions` — log in and set the session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(req): Form<LoginRequest>,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    if !state.accounts.valid_login(&req.email, &req.password).await {
        return Err(AppError::Unauthorized);
    }

    let token = state.accounts.log_in(&req.email).await?;
    let cookie = session_cookie(&state, token)?;

    Ok((
        jar.add(cookie),
        Json(MessageResponse::new(req.email, "logged in")),
    ))
}

/// `DELETE /sessions` — destroy the session and drop the cookie.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let name = cookie_name(&state)?;
    let user = user_from_cookie(&state, &jar, &name)
        .await
        .ok_or(AppError::Forbidden)?;

    state.accounts.log_out(user.id).await?;

    let removal = Cookie::build((name, "")).path("/").build();
    Ok((jar.remove(removal), Redirect::to("/")))
}

/// `GET /profile` — email of the session's user.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<ProfileResponse>, AppError> {
    let name = cookie_name(&state)?;
    let user = user_from_cookie(&state, &jar, &name)
        .await
        .ok_or(AppError::Forbidden)?;

    Ok(Json(ProfileResponse { email: user.email }))
}

/// `POST /reset_password` — issue a reset token.
///
/// The token is delivered out-of-band (here: the debug log), never in the
/// response body.
pub async fn reset_request(
    State(state): State<Arc<AppState>>,
    Form(req): Form<ResetRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let token = state.accounts.issue_reset_token(&req.email).await?;
    tracing::debug!(email = %req.email, token = %token, "reset token ready for delivery");

    Ok(Json(MessageResponse::new(req.email, "reset token issued")))
}

/// `PUT /reset_password` — consume a reset token.
pub async fn reset_update(
    State(state): State<Arc<AppState>>,
    Form(req): Form<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .accounts
        .update_password(&req.reset_token, &req.new_password)
        .await?;

    Ok(Json(MessageResponse {
        email: req.email,
        message: "Password updated".to_string(),
    }))
}

fn cookie_name(state: &AppState) -> Result<String, AppError> {
    state
        .settings
        .session_name
        .clone()
        .ok_or_else(|| AppError::Internal("session cookie name not configured".to_string()))
}

async fn user_from_cookie(state: &AppState, jar: &CookieJar, name: &str) -> Option<User> {
    let token = jar.get(name)?.value().to_string();
    state.accounts.user_from_session(&token).await
}

fn session_cookie(state: &AppState, token: String) -> Result<Cookie<'static>, AppError> {
    let name = cookie_name(state)?;
    Ok(Cookie::build((name, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.settings.secure_cookies)
        .build())
}
