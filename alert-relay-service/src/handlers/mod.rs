//! HTTP handlers for alert-relay-service.

pub mod alert;
pub mod health;
pub mod metrics;

pub use alert::{handle_alert, method_not_allowed};
pub use health::{liveness_probe, readiness_probe};
