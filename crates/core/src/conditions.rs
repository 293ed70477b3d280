//! Well-known alert condition names.
//!
//! These are the canonical strings used as cooldown keys, joined into
//! push-notification bodies, and shown on dashboards. Renaming one resets
//! its cooldown history, so treat them as part of the wire contract.

/// Body temperature (DS18B20 probe) outside the healthy range.
pub const ABNORMAL_BODY_TEMPERATURE: &str = "Abnormal Body Temperature";

/// Heart rate (MAX30100) outside the healthy range.
pub const ABNORMAL_HEART_RATE: &str = "Abnormal Heart Rate";

/// Blood oxygen saturation (MAX30100) below the healthy minimum.
pub const LOW_SPO2: &str = "Low SpO2";
