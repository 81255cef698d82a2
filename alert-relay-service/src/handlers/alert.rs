use axum::{body::Bytes, extract::State};
use service_core::error::AppError;

use crate::models::{AlertEvent, IndicatorCommand, IndicatorStatus};
use crate::services::{record_alert, record_indicator_call, IndicatorProvider, ProviderError};
use crate::startup::AppState;

/// `POST /alert`
///
/// Decodes the payload and, if its reason maps to a status, sends one command
/// to the indicator before answering. Unmapped reasons are accepted as a
/// no-op. Indicator failures never change the response.
#[tracing::instrument(skip_all)]
pub async fn handle_alert(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let alert = AlertEvent::decode(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected undecodable alert payload");
        AppError::BadRequest(anyhow::anyhow!("Failed to decode Alert payload: {}", e))
    })?;

    tracing::info!(
        reason = %alert.reason,
        message = %alert.message,
        "Received alert payload"
    );

    let status = IndicatorStatus::from_reason(&alert.reason);
    record_alert(status);

    if let Some(status) = status {
        trigger_status(state.indicator.as_ref(), status).await;
    }

    Ok("OK")
}

/// Any method other than POST on `/alert`.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Only POST is allowed".to_string())
}

/// Send the command for `status`, logging (not returning) any failure.
pub async fn trigger_status(indicator: &dyn IndicatorProvider, status: IndicatorStatus) {
    tracing::info!(status = %status, "Trigger status {}", status);

    let command = IndicatorCommand::for_status(status);
    match indicator.send(&command).await {
        Ok(()) => record_indicator_call(status, "ok"),
        Err(ProviderError::Rejected { status: code, body }) => {
            tracing::warn!(
                status = %status,
                http_status = code,
                body = %body,
                "blink1-server returned {}",
                code
            );
            record_indicator_call(status, "error");
        }
        Err(e) => {
            tracing::error!(status = %status, error = %e, "Failed to call blink1-server");
            record_indicator_call(status, "error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockIndicatorProvider;
    use crate::startup::build_router;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn post_alert(
        indicator: Arc<MockIndicatorProvider>,
        body: &'static str,
    ) -> (StatusCode, String) {
        let app = build_router(AppState::new(indicator));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/alert")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_build_failed_blinks_red() {
        let indicator = Arc::new(MockIndicatorProvider::new());
        let (status, body) = post_alert(
            indicator.clone(),
            r#"{"reason":"BuildFailed","message":"build 42 failed"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
        assert_eq!(
            indicator.sent(),
            vec![IndicatorCommand::Blink {
                color: "FF0000",
                repeat: 10
            }]
        );
    }

    #[tokio::test]
    async fn test_succeeded_sets_green() {
        let indicator = Arc::new(MockIndicatorProvider::new());
        let (status, _) = post_alert(
            indicator.clone(),
            r#"{"reason":"ReconciliationSucceeded","message":"applied revision main/abc"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            indicator.sent(),
            vec![IndicatorCommand::Set {
                color: "00FF00",
                delay: 2
            }]
        );
    }

    #[tokio::test]
    async fn test_unmapped_reason_is_noop() {
        let indicator = Arc::new(MockIndicatorProvider::new());
        let (status, body) =
            post_alert(indicator.clone(), r#"{"reason":"DependencyNotReady","message":""}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
        assert_eq!(indicator.send_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_reason_is_noop() {
        let indicator = Arc::new(MockIndicatorProvider::new());
        let (status, _) = post_alert(indicator.clone(), r#"{"message":"no reason"}"#).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post_alert(indicator.clone(), r#"{"reason":"","message":""}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(indicator.send_count(), 0);
    }

    #[tokio::test]
    async fn test_capitalized_keys_are_matched() {
        let indicator = Arc::new(MockIndicatorProvider::new());
        let (status, body) =
            post_alert(indicator.clone(), r#"{"Reason":"BuildFailed","Message":"x"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
        assert_eq!(
            indicator.sent(),
            vec![IndicatorCommand::Blink {
                color: "FF0000",
                repeat: 10
            }]
        );
    }

    #[tokio::test]
    async fn test_trailing_bytes_after_payload_are_ignored() {
        let indicator = Arc::new(MockIndicatorProvider::new());
        let (status, body) =
            post_alert(indicator.clone(), r#"{"reason":"BuildFailed"} trailing"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
        assert_eq!(indicator.send_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_body_is_bad_request() {
        let indicator = Arc::new(MockIndicatorProvider::new());
        let (status, body) = post_alert(indicator.clone(), "").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Failed to decode Alert payload: EOF"));
        assert_eq!(indicator.send_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let indicator = Arc::new(MockIndicatorProvider::new());
        let (status, body) = post_alert(indicator.clone(), "not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Failed to decode Alert payload"));
        assert_eq!(indicator.send_count(), 0);
    }

    #[tokio::test]
    async fn test_indicator_failure_still_ok() {
        let indicator = Arc::new(MockIndicatorProvider::failing());
        let (status, body) =
            post_alert(indicator.clone(), r#"{"reason":"Progressing","message":"x"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
        assert_eq!(indicator.send_count(), 1);
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let indicator = Arc::new(MockIndicatorProvider::new());
        let app = build_router(AppState::new(indicator.clone()));
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/alert")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(indicator.send_count(), 0);
    }
}
