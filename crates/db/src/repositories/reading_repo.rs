//! Repository for the `sensor_readings` table.

use chrono::Utc;
use herdlink_core::SensorReading;
use sqlx::PgPool;

use crate::models::reading::SensorReadingRow;

/// Column list for `sensor_readings` queries.
const COLUMNS: &str = "id, tag_number, ambient_temperature, ambient_humidity, heart_rate, \
                       spo2, body_temperature, latitude, longitude, recorded_at, created_at";

/// Provides append operations for sensor readings.
pub struct ReadingRepo;

impl ReadingRepo {
    /// Insert a reading, returning the stored row.
    pub async fn insert(
        pool: &PgPool,
        reading: &SensorReading,
    ) -> Result<SensorReadingRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_readings \
             (tag_number, ambient_temperature, ambient_humidity, heart_rate, spo2, \
              body_temperature, latitude, longitude, recorded_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorReadingRow>(&query)
            .bind(&reading.tag_number)
            .bind(reading.dht22.as_ref().and_then(|s| s.temperature))
            .bind(reading.dht22.as_ref().and_then(|s| s.humidity))
            .bind(reading.max30100.as_ref().and_then(|s| s.heart_rate))
            .bind(reading.max30100.as_ref().and_then(|s| s.spo2))
            .bind(reading.ds18b20.as_ref().and_then(|s| s.temperature))
            .bind(reading.gps.as_ref().and_then(|s| s.latitude))
            .bind(reading.gps.as_ref().and_then(|s| s.longitude))
            .bind(reading.timestamp.with_timezone(&Utc))
            .fetch_one(pool)
            .await
    }
}
