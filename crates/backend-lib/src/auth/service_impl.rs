use async_trait::async_trait;
use metrics::counter;
use std::sync::Arc;

use crate::auth::{password, AccountService, SessionManager};
use crate::auth::token::generate_token;
use crate::error::AppError;
use crate::metrics as keys;
use crate::store::UserStore;
use authd_common::{User, UserId};

/// Default account service over a user store and the session manager.
///
/// Session tokens are written to both the in-memory manager and the user
/// record, so the `session` and `session_db` strategies stay coherent with
/// each other.
pub struct DefaultAccounts {
    users: Arc<dyn UserStore>,
    sessions: Arc<SessionManager>,
}

impl DefaultAccounts {
    pub fn new(users: Arc<dyn UserStore>, sessions: Arc<SessionManager>) -> Self {
        Self { users, sessions }
    }
}

#[async_trait]
impl AccountService for DefaultAccounts {
    async fn register(&self, email: &str, password_plain: &str) -> Result<User, AppError> {
        let hash = password::hash_password(password_plain)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let user = self.users.create_user(email, &hash).await?;

        counter!(keys::USER_REGISTERED).increment(1);
        tracing::info!(email, "user registered");

        Ok(user)
    }

    async fn valid_login(&self, email: &str, password_plain: &str) -> bool {
        if email.is_empty() || password_plain.is_empty() {
            return false;
        }
        match self.users.find_by_email(email).await {
            Some(user) => password::verify_password(&user.hashed_password, password_plain),
            None => false,
        }
    }

    async fn log_in(&self, email: &str) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .ok_or(AppError::UserNotFound)?;

        let token = self.sessions.create(user.id);
        self.users
            .set_session_token(user.id, Some(token.clone()))
            .await?;

        tracing::debug!(email, "session created");
        Ok(token)
    }

    async fn log_out(&self, user_id: UserId) -> Result<(), AppError> {
        self.sessions.destroy(user_id);
        self.users.set_session_token(user_id, None).await?;
        tracing::debug!(%user_id, "session destroyed");
        Ok(())
    }

    async fn user_from_session(&self, token: &str) -> Option<User> {
        if token.is_empty() {
            return None;
        }
        // The manager is the fast path; the persisted token covers sessions
        // created before a restart.
        match self.sessions.find_by_token(token) {
            Some(session) => self.users.find_by_id(session.user_id).await,
            None => self.users.find_by_session_token(token).await,
        }
    }

    async fn issue_reset_token(&self, email: &str) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .ok_or(AppError::UserNotFound)?;

        // Idempotent issuance: a pending token stays valid until consumed.
        if let Some(pending) = user.reset_token {
            return Ok(pending);
        }

        let token = generate_token();
        self.users
            .set_reset_token(user.id, Some(token.clone()))
            .await?;

        counter!(keys::RESET_ISSUED).increment(1);
        tracing::info!(email, "password reset token issued");

        Ok(token)
    }

    async fn update_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_reset_token(reset_token)
            .await
            .ok_or(AppError::InvalidToken)?;

        let hash = password::hash_password(new_password)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        // One store call: new hash lands and the token clears together.
        self.users.update_password(user.id, &hash).await?;

        counter!(keys::RESET_CONSUMED).increment(1);
        tracing::info!(email = %user.email, "password updated via reset token");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryUserStore;

    fn accounts() -> DefaultAccounts {
        DefaultAccounts::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(SessionManager::new()),
        )
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let accounts = accounts();
        let user = accounts.register("a@b.com", "pw1").await.unwrap();
        assert_eq!(user.email, "a@b.com");
        // hash is opaque, never the plaintext
        assert_ne!(user.hashed_password, "pw1");

        assert!(accounts.valid_login("a@b.com", "pw1").await);
        assert!(!accounts.valid_login("a@b.com", "pw2").await);
        assert!(!accounts.valid_login("x@b.com", "pw1").await);
        assert!(!accounts.valid_login("", "").await);
    }

    #[tokio::test]
    async fn test_register_twice_fails() {
        let accounts = accounts();
        accounts.register("a@b.com", "pw1").await.unwrap();
        let err = accounts.register("a@b.com", "pw2").await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyRegistered));
    }

    #[tokio::test]
    async fn test_login_logout_session_lifecycle() {
        let accounts = accounts();
        let user = accounts.register("a@b.com", "pw1").await.unwrap();

        let token = accounts.log_in("a@b.com").await.unwrap();
        let resolved = accounts.user_from_session(&token).await.unwrap();
        assert_eq!(resolved.id, user.id);
        // token persisted on the record as well
        assert_eq!(resolved.session_token.as_deref(), Some(token.as_str()));

        accounts.log_out(user.id).await.unwrap();
        assert!(accounts.user_from_session(&token).await.is_none());

        // idempotent
        accounts.log_out(user.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let accounts = accounts();
        let err = accounts.log_in("ghost@b.com").await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn test_relogin_invalidates_previous_token() {
        let accounts = accounts();
        accounts.register("a@b.com", "pw1").await.unwrap();

        let first = accounts.log_in("a@b.com").await.unwrap();
        let second = accounts.log_in("a@b.com").await.unwrap();

        assert_ne!(first, second);
        assert!(accounts.user_from_session(&first).await.is_none());
        assert!(accounts.user_from_session(&second).await.is_some());
    }

    #[tokio::test]
    async fn test_reset_flow() {
        let accounts = accounts();
        accounts.register("a@b.com", "pw1").await.unwrap();

        let token = accounts.issue_reset_token("a@b.com").await.unwrap();

        // pending token is reused, not replaced
        let again = accounts.issue_reset_token("a@b.com").await.unwrap();
        assert_eq!(token, again);

        accounts.update_password(&token, "newpw").await.unwrap();
        assert!(accounts.valid_login("a@b.com", "newpw").await);
        assert!(!accounts.valid_login("a@b.com", "pw1").await);

        // single use: a consumed token is invalid
        let err = accounts.update_password(&token, "evil").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));

        // and a fresh request mints a new token now
        let fresh = accounts.issue_reset_token("a@b.com").await.unwrap();
        assert_ne!(fresh, token);
    }

    #[tokio::test]
    async fn test_reset_unknown_email() {
        let accounts = accounts();
        let err = accounts.issue_reset_token("ghost@b.com").await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn test_update_password_unknown_token() {
        let accounts = accounts();
        let err = accounts.update_password("bogus", "pw").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
