//! custom-page-server: console custom page and REST server.
//!
//! Configuration is read from the environment (and a `.env` file when
//! present); see [`custom_page_server::config`].

use anyhow::Context;
use custom_page_server::{build_app, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,custom_page_server=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        "Serving custom pages from {} at {}",
        config.pages_root.display(),
        config.page_mount
    );

    let app = build_app(&config)?;

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
