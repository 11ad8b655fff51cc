use async_trait::async_trait;

use crate::error::AppError;
use authd_common::{User, UserId};

/// Account lifecycle operations: registration, login/logout, password reset.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user. `AlreadyRegistered` if the email is taken.
    async fn register(&self, email: &str, password: &str) -> Result<User, AppError>;

    /// Whether the email/password pair matches a stored user.
    async fn valid_login(&self, email: &str, password: &str) -> bool;

    /// Create a session for the user and return its token.
    async fn log_in(&self, email: &str) -> Result<String, AppError>;

    /// Destroy the user's session. Idempotent when no session exists.
    async fn log_out(&self, user_id: UserId) -> Result<(), AppError>;

    /// Resolve a session token to its user.
    async fn user_from_session(&self, token: &str) -> Option<User>;

    /// Issue a password-reset token. A pending token is reused rather than
    /// replaced. `UserNotFound` if the email is unknown.
    async fn issue_reset_token(&self, email: &str) -> Result<String, AppError>;

    /// Consume a reset token and install the new password. `InvalidToken`
    /// if the token is unknown or already spent.
    async fn update_password(&self, reset_token: &str, new_password: &str)
        -> Result<(), AppError>;
}
