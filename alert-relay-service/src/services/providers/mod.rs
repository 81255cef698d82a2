pub mod blink1;

use crate::models::IndicatorCommand;
use async_trait::async_trait;
use thiserror::Error;

pub use blink1::{Blink1Provider, MockIndicatorProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("blink1-server returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Downstream status light.
///
/// Callers treat delivery as fire-and-forget: an `Err` is logged and counted,
/// never retried and never reported back to whoever raised the alert.
#[async_trait]
pub trait IndicatorProvider: Send + Sync {
    async fn send(&self, command: &IndicatorCommand) -> Result<(), ProviderError>;
}
