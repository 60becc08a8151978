use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinematch_api::api::{create_router, AppState};
use cinematch_api::config::Config;
use cinematch_api::net::HttpClient;
use cinematch_api::services::providers::tmdb::TmdbProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let http_client = HttpClient::new(
        &config.dns_servers,
        Duration::from_secs(config.http_timeout_secs),
    )?;

    let catalog = TmdbProvider::new(
        http_client,
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    );

    let state = AppState::new(Arc::new(catalog));
    let app = create_router(state, &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
