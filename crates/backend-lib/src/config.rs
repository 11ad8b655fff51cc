// ============================
// authd-backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Which authentication strategy the deployment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    /// No strategy ever resolves a user; every gated path is denied.
    None,
    /// RFC 7617 Basic authentication against the user store.
    Basic,
    /// Cookie sessions held by the in-memory session manager.
    Session,
    /// Cookie sessions with a time-to-live check.
    SessionExp,
    /// Cookie sessions resolved through the user store (survive restarts).
    SessionDb,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Active authentication strategy
    pub auth_type: AuthType,
    /// Name of the session cookie. When unset, session extraction always
    /// reports "absent" rather than falling back to a default name.
    pub session_name: Option<String>,
    /// Session TTL in seconds, consulted by the `session_exp` and
    /// `session_db` strategies. Unset means `session_exp` never accepts a
    /// session while `session_db` never expires one.
    pub session_ttl_secs: Option<u64>,
    /// Paths exempt from the authentication gate. Matched exactly after
    /// normalizing both sides to a trailing `/`.
    pub excluded_paths: Vec<String>,
    /// Set the `Secure` attribute on session cookies
    pub secure_cookies: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            log_level: "info".to_string(),
            auth_type: AuthType::None,
            session_name: Some("session_id".to_string()),
            session_ttl_secs: None,
            excluded_paths: vec![
                "/".to_string(),
                "/api/v1/status".to_string(),
                "/users".to_string(),
                "/sessions".to_string(),
                "/profile".to_string(),
                "/reset_password".to_string(),
            ],
            secure_cookies: false,
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` and `AUTHD_`-prefixed environment
    /// variables, on top of the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    /// Load settings with an explicit config file path.
    ///
    /// Fails if the file does not exist, so callers can fall back to another
    /// path instead of silently running on defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings: Settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file_exact(path.as_ref()))
            .merge(Env::prefixed("AUTHD_"))
            .extract()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that cannot work at runtime.
    pub fn validate(&self) -> Result<()> {
        match self.log_level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {},
            other => bail!("invalid log level: {other}"),
        }

        if let Some(name) = &self.session_name {
            if name.is_empty() {
                bail!("session_name must not be empty when set");
            }
        }

        if self.session_ttl_secs == Some(0) {
            bail!("session_ttl_secs must be positive when set");
        }

        Ok(())
    }
}
