use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use neechat::infrastructure::llm::create_generation_client;
use neechat::infrastructure::observability::{TracingConfig, init_tracing};
use neechat::infrastructure::persistence::HistoryStoreFactory;
use neechat::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    let generation_client = create_generation_client(&settings.llm)
        .context("Failed to build generation client")?;
    let history_store = HistoryStoreFactory::create(&settings.history);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host/port")?;

    let state = AppState::new(history_store, generation_client, settings);
    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
