// ============================
// authd-backend-lib/src/auth/strategy.rs
// ============================
//! Authentication strategies.
//!
//! One trait, five implementations, selected once at startup from
//! `Settings::auth_type`. Each strategy turns request headers into a
//! resolved user or nothing; it never distinguishes *why* resolution
//! failed. The 401-vs-403 decision belongs to the middleware gate.
use async_trait::async_trait;
use axum::http::HeaderMap;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{credentials, password, session::SessionManager};
use crate::config::{AuthType, Settings};
use crate::store::UserStore;
use authd_common::User;

/// A per-request authentication strategy.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Resolve the request to a user, or report absent.
    async fn current_user(&self, headers: &HeaderMap) -> Option<User>;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}

/// Build the strategy the settings ask for.
pub fn strategy_for(
    settings: &Settings,
    users: Arc<dyn UserStore>,
    sessions: Arc<SessionManager>,
) -> Arc<dyn AuthStrategy> {
    let session_name = settings.session_name.clone();
    match settings.auth_type {
        AuthType::None => Arc::new(NoneAuth),
        AuthType::Basic => Arc::new(BasicAuth { users }),
        AuthType::Session => Arc::new(SessionAuth {
            users,
            sessions,
            session_name,
        }),
        AuthType::SessionExp => {
            let ttl = settings.session_ttl_secs.map(Duration::from_secs);
            if ttl.is_none() {
                tracing::warn!(
                    "session_exp strategy with no session_ttl_secs: all sessions will be rejected"
                );
            }
            Arc::new(SessionExpAuth {
                users,
                sessions,
                session_name,
                ttl,
            })
        },
        AuthType::SessionDb => Arc::new(SessionDbAuth {
            users,
            sessions,
            session_name,
            ttl: settings.session_ttl_secs.map(Duration::from_secs),
        }),
    }
}

/// Strategy that never resolves anyone.
pub struct NoneAuth;

#[async_trait]
impl AuthStrategy for NoneAuth {
    async fn current_user(&self, _headers: &HeaderMap) -> Option<User> {
        None
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// RFC 7617 Basic authentication.
pub struct BasicAuth {
    pub users: Arc<dyn UserStore>,
}

#[async_trait]
impl AuthStrategy for BasicAuth {
    async fn current_user(&self, headers: &HeaderMap) -> Option<User> {
        let header = credentials::authorization_header(headers)?;
        let payload = credentials::extract_base64_payload(header)?;
        let decoded = credentials::decode_base64(payload)?;
        let (email, plain) = credentials::split_credentials(&decoded)?;

        let user = self.users.find_by_email(&email).await?;
        if password::verify_password(&user.hashed_password, &plain) {
            Some(user)
        } else {
            None
        }
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}

/// Cookie sessions held by the in-memory session manager.
pub struct SessionAuth {
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<SessionManager>,
    pub session_name: Option<String>,
}

#[async_trait]
impl AuthStrategy for SessionAuth {
    async fn current_user(&self, headers: &HeaderMap) -> Option<User> {
        let token = credentials::session_cookie(headers, self.session_name.as_deref())?;
        let session = self.sessions.find_by_token(&token)?;
        self.users.find_by_id(session.user_id).await
    }

    fn name(&self) -> &'static str {
        "session"
    }
}

/// Cookie sessions with a TTL.
///
/// With no TTL configured this strategy fails closed: every session is
/// treated as expired. Running it that way is a configuration mistake, and
/// `strategy_for` warns about it at startup.
pub struct SessionExpAuth {
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<SessionManager>,
    pub session_name: Option<String>,
    pub ttl: Option<Duration>,
}

#[async_trait]
impl AuthStrategy for SessionExpAuth {
    async fn current_user(&self, headers: &HeaderMap) -> Option<User> {
        let ttl = self.ttl?;
        let token = credentials::session_cookie(headers, self.session_name.as_deref())?;
        let session = self.sessions.find_valid(&token, ttl)?;
        self.users.find_by_id(session.user_id).await
    }

    fn name(&self) -> &'static str {
        "session_exp"
    }
}

/// Cookie sessions resolved through the persisted token on the user record.
/// Unlike `SessionAuth` this survives a process restart.
///
/// When a TTL is configured it is enforced against the session manager's
/// creation time. A persisted token that predates the process carries no
/// creation time and resolves regardless of the TTL.
pub struct SessionDbAuth {
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<SessionManager>,
    pub session_name: Option<String>,
    pub ttl: Option<Duration>,
}

#[async_trait]
impl AuthStrategy for SessionDbAuth {
    async fn current_user(&self, headers: &HeaderMap) -> Option<User> {
        let token = credentials::session_cookie(headers, self.session_name.as_deref())?;
        if let Some(ttl) = self.ttl {
            if let Some(session) = self.sessions.find_by_token(&token) {
                if session.is_expired(ttl) {
                    return None;
                }
            }
        }
        self.users.find_by_session_token(&token).await
    }

    fn name(&self) -> &'static str {
        "session_db"
    }
}
