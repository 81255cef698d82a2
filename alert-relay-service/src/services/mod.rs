pub mod metrics;
pub mod providers;

pub use metrics::{get_metrics, init_metrics, record_alert, record_indicator_call};
pub use providers::{Blink1Provider, IndicatorProvider, MockIndicatorProvider, ProviderError};
