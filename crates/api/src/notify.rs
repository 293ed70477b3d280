//! Push-notification dispatch.
//!
//! The external push collaborator owns device-to-FCM-token fan-out; this
//! module only issues one POST per permitted alert batch. Exactly one
//! attempt per call: no retry, no backoff, no queue. The ingest response
//! path never waits on it, and the caller logs and swallows failures.

use std::time::Duration;

use async_trait::async_trait;

/// Error type for push delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The push gateway returned a non-2xx status code.
    #[error("Push gateway returned HTTP {0}")]
    HttpStatus(u16),
}

/// Outbound alert channel collaborator seam.
///
/// Held as a trait object in `AppState` so integration tests can record
/// dispatches instead of performing network I/O.
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// Send one alert message for a tag, attaching the triggering reading
    /// as payload. Best-effort.
    async fn notify(
        &self,
        tag_number: &str,
        body: &str,
        data: &serde_json::Value,
    ) -> Result<(), NotifyError>;
}

/// HTTP binding of [`AlertNotifier`].
pub struct PushGateway {
    client: reqwest::Client,
    url: String,
}

impl PushGateway {
    /// Create a gateway client with a per-request timeout.
    pub fn new(url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, url }
    }
}

#[async_trait]
impl AlertNotifier for PushGateway {
    async fn notify(
        &self,
        tag_number: &str,
        body: &str,
        data: &serde_json::Value,
    ) -> Result<(), NotifyError> {
        let payload = serde_json::json!({
            "tagNumber": tag_number,
            "body": body,
            "data": data,
        });

        let response = self.client.post(&self.url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_panic() {
        let _gateway = PushGateway::new(
            "http://localhost:8081/notify".into(),
            Duration::from_secs(10),
        );
    }

    #[test]
    fn notify_error_display_http_status() {
        let err = NotifyError::HttpStatus(502);
        assert_eq!(err.to_string(), "Push gateway returned HTTP 502");
    }

    #[test]
    fn notify_error_display_request() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = NotifyError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
