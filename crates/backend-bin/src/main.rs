use std::sync::Arc;

use backend_lib::{config::Settings, router::create_router, store::MemoryUserStore, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Try the working directory first, then the checked-in default.
    let config = Settings::load().or_else(|_| Settings::load_from("config/default.toml"))?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let users = Arc::new(MemoryUserStore::new());
    let state = Arc::new(AppState::new(users, config.clone()));
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        auth_type = ?config.auth_type,
        "authd listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
