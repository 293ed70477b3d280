//! Alert phase of the ingest pipeline.
//!
//! Runs on a detached task after the HTTP response has been sent:
//! evaluates thresholds, persists breaching readings, applies the
//! cooldown, and dispatches at most one push notification per reading.
//! Every failure in here is logged and swallowed; the device already got
//! its acknowledgment and must never see downstream trouble.

use chrono::Utc;
use herdlink_core::SensorReading;

use crate::state::AppState;

/// Delimiter joining condition names into one notification body.
const CONDITION_DELIMITER: &str = ", ";

/// Evaluate one reading and raise whatever alerts it warrants.
pub async fn process_reading(state: AppState, reading: SensorReading) {
    let triggered = state.thresholds.evaluate(&reading);
    if triggered.is_empty() {
        return;
    }
    tracing::info!(
        tag = %reading.tag_number,
        conditions = ?triggered,
        "Thresholds breached"
    );

    // Alert-triggered persistence: healthy readings never reach the store.
    // A storage failure costs this one sample, not the acknowledgment.
    if let Err(e) = state.store.append(&reading).await {
        tracing::error!(tag = %reading.tag_number, error = %e, "Failed to persist reading");
    }

    let now = Utc::now();
    let permitted: Vec<&str> = triggered
        .into_iter()
        .filter(|condition| {
            state
                .cooldown
                .should_send(&reading.tag_number, condition, now)
        })
        .collect();
    if permitted.is_empty() {
        tracing::debug!(tag = %reading.tag_number, "All breached conditions in cooldown");
        return;
    }

    let body = permitted.join(CONDITION_DELIMITER);
    let data = match serde_json::to_value(&reading) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(tag = %reading.tag_number, error = %e, "Failed to encode reading");
            return;
        }
    };

    if let Err(e) = state
        .notifier
        .notify(&reading.tag_number, &body, &data)
        .await
    {
        tracing::warn!(tag = %reading.tag_number, error = %e, "Push notification dropped");
    }
}
