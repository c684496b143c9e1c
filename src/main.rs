use threat_analyst::{AppConfig, AppState, app_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if exists
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    if config.api_key.is_none() {
        tracing::warn!("API_KEY is not set; analysis requests will be rejected until it is");
    }
    tracing::info!("Using model {} at {}", config.model, config.api_base);

    let addr = config.socket_addr()?;
    let app = app_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
