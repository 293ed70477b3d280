//! Sensor reading document model.
//!
//! One [`SensorReading`] is a single sample from a wearable tag. Every
//! sensor block is optional: tags ship with different sensor loadouts and
//! firmware omits blocks it could not read. An absent block means "not
//! measurable this sample", never zero.
//!
//! Wire field names are camelCase to match the tag firmware
//! (`tagNumber`, `heartRate`, ...).

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Fixed UTC offset used when a reading arrives without a timestamp.
///
/// Herd deployments run on Pakistan Standard Time (UTC+05:00, no DST);
/// dashboards expect defaulted timestamps rendered in that offset.
pub const LOCAL_UTC_OFFSET_SECS: i32 = 5 * 3600;

/// Ambient temperature and humidity block (DHT22 sensor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dht22Sample {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
}

/// Biometric block (MAX30100 pulse oximeter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Max30100Sample {
    pub heart_rate: Option<f64>,
    pub spo2: Option<f64>,
}

/// Body temperature block (DS18B20 probe).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ds18b20Sample {
    pub temperature: Option<f64>,
}

/// Location block (GPS module).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsFix {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A validated sensor sample from one tag.
///
/// `tag_number` is always present and non-empty; the ingest handler
/// rejects anything else before a `SensorReading` is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub tag_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dht22: Option<Dht22Sample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max30100: Option<Max30100Sample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ds18b20: Option<Ds18b20Sample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsFix>,
    pub timestamp: DateTime<FixedOffset>,
}

impl SensorReading {
    /// The ingestion-time timestamp used when a tag omits its own.
    pub fn default_timestamp() -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(LOCAL_UTC_OFFSET_SECS)
            .expect("herd-local UTC offset is in range");
        Utc::now().with_timezone(&offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_device_document() {
        let doc = serde_json::json!({
            "tagNumber": "COW1",
            "dht22": { "temperature": 24.5, "humidity": 61.0 },
            "max30100": { "heartRate": 72.0, "spo2": 97.5 },
            "ds18b20": { "temperature": 38.2 },
            "gps": { "latitude": 33.6844, "longitude": 73.0479 },
            "timestamp": "2025-05-01T10:30:00+05:00"
        });

        let reading: SensorReading = serde_json::from_value(doc).unwrap();
        assert_eq!(reading.tag_number, "COW1");
        assert_eq!(reading.max30100.as_ref().unwrap().heart_rate, Some(72.0));
        assert_eq!(reading.ds18b20.as_ref().unwrap().temperature, Some(38.2));
    }

    #[test]
    fn missing_blocks_deserialize_as_none() {
        let doc = serde_json::json!({
            "tagNumber": "COW2",
            "max30100": { "spo2": 96.0 },
            "timestamp": "2025-05-01T10:30:00+05:00"
        });

        let reading: SensorReading = serde_json::from_value(doc).unwrap();
        assert!(reading.dht22.is_none());
        assert!(reading.ds18b20.is_none());
        assert!(reading.gps.is_none());
        // Present block, absent field.
        assert_eq!(reading.max30100.as_ref().unwrap().heart_rate, None);
    }

    #[test]
    fn default_timestamp_uses_herd_local_offset() {
        let ts = SensorReading::default_timestamp();
        assert_eq!(ts.offset().local_minus_utc(), LOCAL_UTC_OFFSET_SECS);
    }
}
