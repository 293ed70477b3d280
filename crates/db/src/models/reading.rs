//! Persisted sensor reading rows.

use herdlink_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sensor_readings` table.
///
/// Sensor blocks are flattened into nullable columns; a NULL column means
/// the tag did not report that metric in the stored sample.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SensorReadingRow {
    pub id: DbId,
    pub tag_number: String,
    pub ambient_temperature: Option<f64>,
    pub ambient_humidity: Option<f64>,
    pub heart_rate: Option<f64>,
    pub spo2: Option<f64>,
    pub body_temperature: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub recorded_at: Timestamp,
    pub created_at: Timestamp,
}
