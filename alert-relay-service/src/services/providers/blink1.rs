use super::{IndicatorProvider, ProviderError};
use crate::models::IndicatorCommand;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Url};
use service_core::observability::inject_trace_context;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// HTTP client for a blink(1) server.
///
/// Uses reqwest's defaults, which means no request timeout: a hung server
/// holds the inbound alert request open until the connection drops.
#[derive(Clone)]
pub struct Blink1Provider {
    client: Client,
    base_url: String,
}

impl Blink1Provider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for `command`, e.g. `<base>/blink?color=FF0000&repeat=10`.
    pub fn command_url(&self, command: &IndicatorCommand) -> Result<Url, ProviderError> {
        let endpoint = format!("{}{}", self.base_url, command.path());
        Url::parse_with_params(&endpoint, command.query())
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", endpoint, e)))
    }
}

#[async_trait]
impl IndicatorProvider for Blink1Provider {
    async fn send(&self, command: &IndicatorCommand) -> Result<(), ProviderError> {
        let url = self.command_url(command)?;

        let mut headers = HeaderMap::new();
        inject_trace_context(&mut headers);

        tracing::debug!(url = %url, "Calling blink1-server");

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                ProviderError::Connection(format!("Failed to call blink1-server: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Mock indicator for testing; remembers every command it is sent.
#[derive(Default)]
pub struct MockIndicatorProvider {
    fail: bool,
    send_count: AtomicU64,
    sent: Mutex<Vec<IndicatorCommand>>,
}

impl MockIndicatorProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose every send fails with a connection error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<IndicatorCommand> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl IndicatorProvider for MockIndicatorProvider {
    async fn send(&self, command: &IndicatorCommand) -> Result<(), ProviderError> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(command.clone());
        }

        tracing::info!(
            path = command.path(),
            color = command.color(),
            "[MOCK] Indicator command would be sent"
        );

        if self.fail {
            return Err(ProviderError::Connection(
                "Mock indicator is unreachable".to_string(),
            ));
        }

        Ok(())
    }
}
