//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "message": ... }` acknowledgment envelope.
///
/// Used where a handler acknowledges receipt without returning data,
/// e.g. the ingest endpoint's `201` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
