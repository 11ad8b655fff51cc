// ============================
// authd-backend-lib/src/auth/session.rs
// ============================
//! Session token handling and management.
//!
//! Sessions live in their own map keyed by token, decoupled from the user
//! record. One live session per user: a new login overwrites the previous
//! token.
use dashmap::DashMap;
use metrics::{counter, gauge};
use std::time::{Duration, SystemTime};

use crate::auth::token::generate_token;
use crate::metrics as keys;
use authd_common::UserId;

/// Session information
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub created_at: SystemTime,
}

impl Session {
    /// Whether this session has outlived `ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        match self.created_at.elapsed() {
            Ok(age) => age > ttl,
            // A created_at in the future means clock skew; treat as expired.
            Err(_) => true,
        }
    }
}

/// Session manager for authentication tokens
#[derive(Default)]
pub struct SessionManager {
    by_token: DashMap<String, Session>,
    by_user: DashMap<UserId, String>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for a user, overwriting any existing one.
    pub fn create(&self, user_id: UserId) -> String {
        let token = generate_token();
        let session = Session {
            user_id,
            created_at: SystemTime::now(),
        };

        if let Some(old_token) = self.by_user.insert(user_id, token.clone()) {
            self.by_token.remove(&old_token);
        }
        self.by_token.insert(token.clone(), session);

        counter!(keys::SESSION_CREATED).increment(1);
        gauge!(keys::SESSION_ACTIVE).set(self.by_token.len() as f64);

        token
    }

    /// Raw lookup by token. No TTL is applied here.
    pub fn find_by_token(&self, token: &str) -> Option<Session> {
        self.by_token.get(token).map(|s| s.value().clone())
    }

    /// Lookup with a TTL check: sessions older than `ttl` are absent.
    pub fn find_valid(&self, token: &str, ttl: Duration) -> Option<Session> {
        let session = self.find_by_token(token)?;
        if session.is_expired(ttl) {
            None
        } else {
            Some(session)
        }
    }

    /// Destroy the user's session, if any. Idempotent.
    pub fn destroy(&self, user_id: UserId) {
        if let Some((_, token)) = self.by_user.remove(&user_id) {
            self.by_token.remove(&token);
            counter!(keys::SESSION_DESTROYED).increment(1);
            gauge!(keys::SESSION_ACTIVE).set(self.by_token.len() as f64);
        }
    }
}
