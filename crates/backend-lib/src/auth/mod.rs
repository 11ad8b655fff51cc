// ============================
// authd-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod credentials;
pub mod password;
pub mod policy;
mod service;
mod service_impl;
pub mod session;
pub mod strategy;
pub mod token;

pub use password::{hash_password, verify_password};
pub use policy::require_auth;
pub use service::AccountService;
pub use service_impl::DefaultAccounts;
pub use session::{Session, SessionManager};
pub use strategy::{strategy_for, AuthStrategy};
pub use token::generate_token;
