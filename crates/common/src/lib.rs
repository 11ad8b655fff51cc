// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! shared between the `authd` core library and its HTTP surface.
//! This module defines the user record and the request/response bodies.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique user identifier
pub type UserId = Uuid;

/// A user record as held by the user store.
///
/// `session_token` and `reset_token` are unique when present. The session
/// token is set on login and cleared on logout; the reset token is set when
/// a password reset is requested and cleared by the password update that
/// consumes it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Opaque PHC-format password hash. Never serialized.
    pub hashed_password: String,
    pub session_token: Option<String>,
    pub reset_token: Option<String>,
}

/// Body of `POST /users`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /sessions`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /reset_password`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResetRequest {
    pub email: String,
}

/// Body of `PUT /reset_password`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    pub email: Option<String>,
    pub reset_token: String,
    pub new_password: String,
}

/// Generic `{"email": ..., "message": ...}` success body
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
}

impl MessageResponse {
    pub fn new(email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            message: message.into(),
        }
    }

}

/// Body of `GET /profile` and `GET /api/v1/me`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProfileResponse {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_response_omits_absent_email() {
        let body = MessageResponse {
            email: None,
            message: "Password updated".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"message":"Password updated"}"#);

        let body = MessageResponse::new("a@b.com", "user created");
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"email":"a@b.com","message":"user created"}"#);
    }
}
