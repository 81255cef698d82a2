//! Router construction and server lifecycle.

use crate::config::RelayConfig;
use crate::handlers;
use crate::services::{Blink1Provider, IndicatorProvider};
use axum::{
    middleware::from_fn,
    routing::{any, get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub indicator: Arc<dyn IndicatorProvider>,
}

impl AppState {
    pub fn new(indicator: Arc<dyn IndicatorProvider>) -> Self {
        Self { indicator }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/alert",
            post(handlers::handle_alert).fallback(handlers::method_not_allowed),
        )
        .route("/readyz", any(handlers::readiness_probe))
        .route("/livez", any(handlers::liveness_probe))
        .route("/metrics", get(handlers::metrics::metrics))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and wire the blink(1) client from `config`.
    ///
    /// Port 0 binds a random free port, used by tests.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let indicator = Blink1Provider::new(config.blink1_server_url.clone());
        tracing::info!(
            blink1_server_url = %indicator.base_url(),
            "Using blink1 server URL: {}",
            indicator.base_url()
        );

        let router = build_router(AppState::new(Arc::new(indicator)));

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Listening on port {}", self.port);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
