use cinesense::{
    api::{create_router, AppState},
    config::Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinesense=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Initialize application state
    let state = AppState::from_config(&config)?;

    tracing::info!(
        recommender = %config.recommender_api_url,
        catalog_items = state.inner.catalog.len(),
        "Application state initialized"
    );

    // Best-effort probe; an unreachable recommender only means fallback results
    let provider = state.inner.provider.clone();
    tokio::spawn(async move {
        if provider.health().await.is_some() {
            tracing::info!("Recommendation service healthy");
        }
    });

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
