// ============================
// authd-backend-lib/src/store.rs
// ============================
//! User store abstraction with an in-memory implementation.
//!
//! Persistence is a collaborator, not part of the core: the strategies and
//! the account service only ever see this trait. `MemoryUserStore` is the
//! reference backend used by the binary and the tests; a database-backed
//! implementation slots in behind the same trait.
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::AppError;
use authd_common::{User, UserId};

/// Lookup-by-field interface over the user collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Option<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
    async fn find_by_session_token(&self, token: &str) -> Option<User>;
    async fn find_by_reset_token(&self, token: &str) -> Option<User>;

    /// Create a user. Email uniqueness is enforced here, so concurrent
    /// registrations for the same email cannot both succeed.
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AppError>;

    /// Set or clear the persisted session token.
    async fn set_session_token(&self, id: UserId, token: Option<String>)
        -> Result<(), AppError>;

    /// Set or clear the pending reset token.
    async fn set_reset_token(&self, id: UserId, token: Option<String>) -> Result<(), AppError>;

    /// Install a new password hash and clear the reset token in one step.
    /// There is no state where the password changed but the token remains
    /// consumable.
    async fn update_password(&self, id: UserId, new_hash: &str) -> Result<(), AppError>;
}

/// In-memory implementation of the `UserStore` trait
#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<UserId, User>,
    by_email: DashMap<String, UserId>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn scan<F>(&self, pred: F) -> Option<User>
    where
        F: Fn(&User) -> bool,
    {
        self.users
            .iter()
            .find(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: UserId) -> Option<User> {
        self.users.get(&id).map(|u| u.value().clone())
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        let id = *self.by_email.get(email)?;
        self.find_by_id(id).await
    }

    async fn find_by_session_token(&self, token: &str) -> Option<User> {
        self.scan(|u| u.session_token.as_deref() == Some(token))
    }

    async fn find_by_reset_token(&self, token: &str) -> Option<User> {
        self.scan(|u| u.reset_token.as_deref() == Some(token))
    }

    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AppError> {
        // The entry guard holds the shard lock, so two concurrent calls for
        // the same email serialize here and the loser sees Occupied.
        match self.by_email.entry(email.to_string()) {
            Entry::Occupied(_) => Err(AppError::AlreadyRegistered),
            Entry::Vacant(slot) => {
                let user = User {
                    id: Uuid::new_v4(),
                    email: email.to_string(),
                    hashed_password: hashed_password.to_string(),
                    session_token: None,
                    reset_token: None,
                };
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            },
        }
    }

    async fn set_session_token(
        &self,
        id: UserId,
        token: Option<String>,
    ) -> Result<(), AppError> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;
        user.session_token = token;
        Ok(())
    }

    async fn set_reset_token(&self, id: UserId, token: Option<String>) -> Result<(), AppError> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;
        user.reset_token = token;
        Ok(())
    }

    async fn update_password(&self, id: UserId, new_hash: &str) -> Result<(), AppError> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;
        user.hashed_password = new_hash.to_string();
        user.reset_token = None;
        Ok(())
    }
}
