//! Probe endpoints. They hold no state and always succeed while the
//! process is serving.

pub async fn readiness_probe() -> &'static str {
    "READY"
}

pub async fn liveness_probe() -> &'static str {
    "UP"
}
