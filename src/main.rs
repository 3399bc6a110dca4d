use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ragchat::{AppState, Config, OpenAiClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ragchat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fatal if the API credential is missing.
    let config = Config::from_env()?;
    let client = Arc::new(OpenAiClient::new(&config));

    let addr = config.bind_addr.clone();
    let app = ragchat::create_router(AppState::new(config, client));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("ragchat listening on {}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("  GET  /knowledge-bases - List knowledge bases");
    tracing::info!("  POST /session         - Open a chat session");
    tracing::info!("  POST /chat            - One chat turn");

    axum::serve(listener, app).await?;

    Ok(())
}
