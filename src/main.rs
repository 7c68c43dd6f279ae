use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use axum_charsheet::{
    app,
    auth::AuthManager,
    config::{Backend, Config},
    services::{MemoryRepository, RedisRepository, Repository},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Configuration problems are fatal
    let config = Config::load().context("Failed to load configuration")?;
    let auth = AuthManager::from_config(&config.session, &config.auth)
        .context("Invalid session configuration")?;

    let repo: Arc<dyn Repository> = match config.database.backend {
        Backend::Redis => {
            let client = redis::Client::open(config.database.url.as_str())
                .context("Invalid Redis connection string")?;
            let repo = RedisRepository::new(
                Arc::new(client),
                Duration::from_secs(config.database.timeout_secs),
            );
            repo.ping().await.context("Failed to connect to Redis")?;
            Arc::new(repo)
        }
        Backend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            Arc::new(MemoryRepository::new())
        }
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let router = app(AppState::new(repo, auth, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
