use anyhow::{Context, Result};
use playground_server::{
    router::create_app_router,
    shutdown::{run_server_with_graceful_shutdown, GracefulShutdown},
    AppConfig, AppState, LogFormat,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading any configuration
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = AppConfig::from_env();
    init_tracing(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        dotenv = dotenv_loaded,
        "Starting playground server"
    );

    if config.weather_api_key.is_none() {
        warn!("WEATHERAPI_KEY is not set; /weather will return an error");
    }

    let bind_addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;
    let shutdown = GracefulShutdown::new().with_timeout(config.request_timeout);

    let app_state = Arc::new(AppState::new(config)?);
    let app = create_app_router(app_state);

    run_server_with_graceful_shutdown(app, bind_addr, shutdown).await?;

    info!("Server shut down complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "playground_server={level},tower_http={level},axum={level}",
            level = config.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
