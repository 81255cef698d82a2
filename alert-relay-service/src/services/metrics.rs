//! Prometheus metrics for the relay.

use crate::models::IndicatorStatus;
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Call once, from `main`.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics handle already initialized"))?;

    Ok(())
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count a decoded alert by the status it maps to.
pub fn record_alert(status: Option<IndicatorStatus>) {
    let status = status.map(IndicatorStatus::name).unwrap_or("UNMAPPED");
    counter!("alerts_received_total", "status" => status).increment(1);
}

/// Count a downstream call by status and outcome (`ok` or `error`).
pub fn record_indicator_call(status: IndicatorStatus, outcome: &'static str) {
    counter!(
        "indicator_commands_total",
        "status" => status.name(),
        "outcome" => outcome
    )
    .increment(1);
}
