//! Handlers for the `/readings` resource.

use axum::extract::ws::Message;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use herdlink_core::error::CoreError;
use herdlink_core::reading::{Dht22Sample, Ds18b20Sample, GpsFix, Max30100Sample};
use herdlink_core::SensorReading;

use crate::alerts;
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payload types
// ---------------------------------------------------------------------------

/// Ingest payload as sent by tag firmware.
///
/// Everything except `tagNumber` is optional; `tagNumber` is optional
/// here only so its absence maps to a 400 instead of a deserialization
/// rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPayload {
    pub tag_number: Option<String>,
    pub dht22: Option<Dht22Sample>,
    pub max30100: Option<Max30100Sample>,
    pub ds18b20: Option<Ds18b20Sample>,
    pub gps: Option<GpsFix>,
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl ReadingPayload {
    /// Validate and normalize into a domain reading.
    fn into_reading(self) -> Result<SensorReading, CoreError> {
        let tag_number = self
            .tag_number
            .filter(|tag| !tag.trim().is_empty())
            .ok_or_else(|| CoreError::Validation("tagNumber is required".into()))?;

        Ok(SensorReading {
            tag_number,
            dht22: self.dht22,
            max30100: self.max30100,
            ds18b20: self.ds18b20,
            gps: self.gps,
            timestamp: self
                .timestamp
                .unwrap_or_else(SensorReading::default_timestamp),
        })
    }
}

/// Frame pushed to subscribers of a tag.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BroadcastFrame<'a> {
    tag_number: &'a str,
    data: &'a SensorReading,
}

// ---------------------------------------------------------------------------
// Ingest
// ---------------------------------------------------------------------------

/// POST /api/v1/readings
///
/// Relay-first ingest: fan the reading out to live subscribers, then
/// acknowledge with `201`. Threshold evaluation, persistence, and
/// notification run on a detached task, so downstream latency or outages
/// never show up in the device's response.
pub async fn ingest_reading(
    State(state): State<AppState>,
    Json(payload): Json<ReadingPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let reading = payload.into_reading()?;

    let frame = serde_json::to_value(BroadcastFrame {
        tag_number: &reading.tag_number,
        data: &reading,
    })
    .map_err(|e| AppError::Internal(e.to_string()))?;

    let delivered = state
        .registry
        .publish(&reading.tag_number, Message::Text(frame.to_string().into()));
    tracing::debug!(tag = %reading.tag_number, delivered, "Broadcast reading");

    tokio::spawn(alerts::process_reading(state, reading));

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Reading accepted",
        }),
    ))
}
