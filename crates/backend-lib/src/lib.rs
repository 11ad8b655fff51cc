// ============================
// authd-backend-lib/src/lib.rs
// ============================
//! Core authentication library for the `authd` HTTP API.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod store;

use std::sync::Arc;

use crate::auth::{strategy_for, AccountService, AuthStrategy, DefaultAccounts, SessionManager};
use crate::config::Settings;
use crate::store::UserStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// User store backend
    pub users: Arc<dyn UserStore>,
    /// In-memory session manager
    pub sessions: Arc<SessionManager>,
    /// Active authentication strategy, selected by `Settings::auth_type`
    pub strategy: Arc<dyn AuthStrategy>,
    /// Account operations (register, login, logout, password reset)
    pub accounts: Arc<dyn AccountService>,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire up the state from a user store and validated settings.
    pub fn new(users: Arc<dyn UserStore>, settings: Settings) -> Self {
        let sessions = Arc::new(SessionManager::new());
        let strategy = strategy_for(&settings, Arc::clone(&users), Arc::clone(&sessions));
        let accounts: Arc<dyn AccountService> = Arc::new(DefaultAccounts::new(
            Arc::clone(&users),
            Arc::clone(&sessions),
        ));
        Self {
            users,
            sessions,
            strategy,
            accounts,
            settings: Arc::new(settings),
        }
    }
}
