// ============================
// authd-backend-lib/src/router.rs
// ============================
//! HTTP router wiring: routes, authentication gate, trace layer.
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware::auth_gate, AppState};

/// Build the application router.
///
/// The gate wraps every registered route; the account routes stay reachable
/// through the default excluded-path set and enforce their own rules.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/v1/status", get(handlers::status))
        .route("/api/v1/me", get(handlers::me))
        .route("/users", post(handlers::register))
        .route(
            "/sessions",
            post(handlers::login).delete(handlers::logout),
        )
        .route("/profile", get(handlers::profile))
        .route(
            "/reset_password",
            post(handlers::reset_request).put(handlers::reset_update),
        )
        .layer(from_fn_with_state(Arc::clone(&state), auth_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
