use alert_relay_service::config::RelayConfig;
use alert_relay_service::services::init_metrics;
use alert_relay_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is read by the config loader, after tracing is up
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty());
    init_tracing("alert-relay-service", "info", otlp_endpoint.as_deref())?;

    tracing::info!("Starting alert-relay-service v{}", env!("CARGO_PKG_VERSION"));

    init_metrics()?;

    let config = RelayConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    Ok(())
}
