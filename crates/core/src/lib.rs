//! Herdlink domain logic.
//!
//! Pure building blocks for the telemetry relay and alerting pipeline:
//!
//! - [`reading`] — the sensor reading document sent by wearable tags.
//! - [`thresholds`] — stateless classification of readings against
//!   medical ranges.
//! - [`cooldown`] — per-(tag, condition) alert deduplication.
//!
//! No I/O lives in this crate; the web layer and storage bindings build
//! on top of it.

pub mod conditions;
pub mod cooldown;
pub mod error;
pub mod reading;
pub mod thresholds;
pub mod types;

pub use cooldown::AlertCooldown;
pub use reading::SensorReading;
pub use thresholds::ThresholdSpec;
