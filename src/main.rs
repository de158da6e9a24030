use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use shelfmate::{
    config::Config,
    routes::{create_router, AppState},
    services::{providers::HttpBookService, Session},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        api_url = %config.api_base(),
        timeout_secs = config.request_timeout_secs,
        locale = ?config.locale,
        "Configuration loaded"
    );

    let provider = HttpBookService::new(config.api_base(), config.request_timeout())?;
    let session = Session::new(Arc::new(provider), config.locale);

    // Create the router with all routes
    let app = create_router(AppState::new(session));

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
