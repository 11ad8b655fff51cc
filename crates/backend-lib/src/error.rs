// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// Request carried no usable credentials at all.
    #[error("Unauthorized")]
    Unauthorized,

    /// Credentials were present but did not resolve to a user.
    #[error("Forbidden")]
    Forbidden,

    #[error("email already registered")]
    AlreadyRegistered,

    /// Password reset requested for an unknown email.
    #[error("no user for that email")]
    UserNotFound,

    /// Password reset attempted with an unknown or spent token.
    #[error("invalid reset token")]
    InvalidToken,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            // Reset failures surface as 403 so callers cannot probe which
            // emails or tokens exist.
            AppError::Forbidden | AppError::UserNotFound | AppError::InvalidToken => {
                StatusCode::FORBIDDEN
            },
            AppError::AlreadyRegistered => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "AUTH_001",
            AppError::Forbidden => "AUTH_002",
            AppError::AlreadyRegistered => "REG_001",
            AppError::UserNotFound => "RESET_001",
            AppError::InvalidToken => "RESET_002",
            AppError::NotFound(_) => "NF_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for the response body.
    ///
    /// Both reset errors collapse into a plain "Forbidden" to avoid account
    /// enumeration through the reset endpoints.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::Forbidden | AppError::UserNotFound | AppError::InvalidToken => {
                "Forbidden".to_string()
            },
            AppError::AlreadyRegistered => "email already registered".to_string(),
            AppError::NotFound(_) => "Not found".to_string(),
            AppError::Internal(_) | AppError::Io(_) => {
                "An internal server error occurred".to_string()
            },
            AppError::Json(_) => "Invalid request format".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "request failed: {self}");
        } else {
            tracing::debug!(code = self.error_code(), "request denied: {self}");
        }

        let body = serde_json::json!({ "error": self.sanitized_message() });

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::AlreadyRegistered.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::UserNotFound.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::NotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_reset_errors_are_generic() {
        // Neither reset failure may leak whether the email or token existed.
        assert_eq!(AppError::UserNotFound.sanitized_message(), "Forbidden");
        assert_eq!(AppError::InvalidToken.sanitized_message(), "Forbidden");
    }

    #[test]
    fn test_app_error_error_codes() {
        assert_eq!(AppError::Unauthorized.error_code(), "AUTH_001");
        assert_eq!(AppError::Forbidden.error_code(), "AUTH_002");
        assert_eq!(AppError::AlreadyRegistered.error_code(), "REG_001");
        assert_eq!(AppError::Internal("test".to_string()).error_code(), "INT_001");
    }

    #[test]
    fn test_app_error_into_response() {
        let response = AppError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AppError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::Unauthorized.into_response();
        assert!(response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("application/json"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Unauthorized" }));
    }

    #[test]
    fn test_error_from_impls() {
        let string_err = "String error".to_string();
        let app_err: AppError = string_err.into();
        assert!(matches!(app_err, AppError::Internal(_)));

        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
    }
}
