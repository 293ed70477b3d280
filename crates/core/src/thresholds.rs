//! Threshold evaluation for sensor readings.
//!
//! [`ThresholdSpec`] maps metrics to healthy ranges and classifies a
//! reading into the set of breached condition names. Evaluation is pure:
//! no clock, no state, no I/O. Metrics absent from a reading are skipped,
//! so a tag without a given sensor can never raise that alert.

use crate::conditions;
use crate::reading::SensorReading;

/// A healthy numeric range with optional bounds.
///
/// Comparison is strict: a value exactly at a bound is healthy, only
/// `value < min` or `value > max` breaches. NaN never breaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl MetricRange {
    /// Range bounded on both sides.
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// One-sided range with only a lower bound.
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Whether `value` falls strictly outside the range.
    pub fn is_breached(&self, value: f64) -> bool {
        let below = self.min.is_some_and(|min| value < min);
        let above = self.max.is_some_and(|max| value > max);
        below || above
    }
}

/// Extracts one metric value from a reading, if that sensor reported it.
type MetricSelector = fn(&SensorReading) -> Option<f64>;

/// One configured alert condition: a metric, its healthy range, and the
/// condition name raised on breach.
struct ThresholdEntry {
    condition: &'static str,
    range: MetricRange,
    metric: MetricSelector,
}

/// Static threshold configuration, read-only for the process lifetime.
pub struct ThresholdSpec {
    entries: Vec<ThresholdEntry>,
}

impl ThresholdSpec {
    /// Classify a reading into the breached condition names.
    ///
    /// Conditions are independent: one reading can breach several at once,
    /// and each appears at most once, in configuration order.
    pub fn evaluate(&self, reading: &SensorReading) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let value = (entry.metric)(reading)?;
                entry.range.is_breached(value).then_some(entry.condition)
            })
            .collect()
    }
}

fn body_temperature(reading: &SensorReading) -> Option<f64> {
    reading.ds18b20.as_ref().and_then(|s| s.temperature)
}

fn heart_rate(reading: &SensorReading) -> Option<f64> {
    reading.max30100.as_ref().and_then(|s| s.heart_rate)
}

fn spo2(reading: &SensorReading) -> Option<f64> {
    reading.max30100.as_ref().and_then(|s| s.spo2)
}

impl Default for ThresholdSpec {
    /// The veterinary defaults: body temperature 30-39 °C, heart rate
    /// 60-100 bpm, SpO2 at least 95 % (no upper limit).
    fn default() -> Self {
        Self {
            entries: vec![
                ThresholdEntry {
                    condition: conditions::ABNORMAL_BODY_TEMPERATURE,
                    range: MetricRange::between(30.0, 39.0),
                    metric: body_temperature,
                },
                ThresholdEntry {
                    condition: conditions::ABNORMAL_HEART_RATE,
                    range: MetricRange::between(60.0, 100.0),
                    metric: heart_rate,
                },
                ThresholdEntry {
                    condition: conditions::LOW_SPO2,
                    range: MetricRange::at_least(95.0),
                    metric: spo2,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{Ds18b20Sample, Max30100Sample};

    fn reading(
        body_temp: Option<f64>,
        heart_rate: Option<f64>,
        spo2: Option<f64>,
    ) -> SensorReading {
        SensorReading {
            tag_number: "COW1".into(),
            dht22: None,
            max30100: (heart_rate.is_some() || spo2.is_some()).then(|| Max30100Sample {
                heart_rate,
                spo2,
            }),
            ds18b20: body_temp.map(|t| Ds18b20Sample {
                temperature: Some(t),
            }),
            gps: None,
            timestamp: "2025-05-01T10:30:00+05:00".parse().unwrap(),
        }
    }

    #[test]
    fn healthy_reading_raises_nothing() {
        let spec = ThresholdSpec::default();
        assert!(spec.evaluate(&reading(Some(38.0), Some(80.0), Some(98.0))).is_empty());
    }

    #[test]
    fn values_exactly_at_bounds_are_healthy() {
        let spec = ThresholdSpec::default();
        assert!(spec.evaluate(&reading(Some(30.0), None, None)).is_empty());
        assert!(spec.evaluate(&reading(Some(39.0), None, None)).is_empty());
        assert!(spec.evaluate(&reading(None, Some(60.0), None)).is_empty());
        assert!(spec.evaluate(&reading(None, Some(100.0), None)).is_empty());
        assert!(spec.evaluate(&reading(None, None, Some(95.0))).is_empty());
    }

    #[test]
    fn values_just_outside_bounds_breach() {
        let spec = ThresholdSpec::default();
        assert_eq!(
            spec.evaluate(&reading(Some(29.9), None, None)),
            vec![conditions::ABNORMAL_BODY_TEMPERATURE]
        );
        assert_eq!(
            spec.evaluate(&reading(Some(39.1), None, None)),
            vec![conditions::ABNORMAL_BODY_TEMPERATURE]
        );
        assert_eq!(
            spec.evaluate(&reading(None, Some(150.0), None)),
            vec![conditions::ABNORMAL_HEART_RATE]
        );
        assert_eq!(
            spec.evaluate(&reading(None, None, Some(90.0))),
            vec![conditions::LOW_SPO2]
        );
    }

    #[test]
    fn spo2_has_no_upper_limit() {
        let spec = ThresholdSpec::default();
        assert!(spec.evaluate(&reading(None, None, Some(100.0))).is_empty());
    }

    #[test]
    fn absent_blocks_never_contribute() {
        let spec = ThresholdSpec::default();
        assert!(spec.evaluate(&reading(None, None, None)).is_empty());
    }

    #[test]
    fn multiple_breaches_all_appear() {
        let spec = ThresholdSpec::default();
        let breached = spec.evaluate(&reading(Some(41.0), Some(150.0), Some(85.0)));
        assert_eq!(
            breached,
            vec![
                conditions::ABNORMAL_BODY_TEMPERATURE,
                conditions::ABNORMAL_HEART_RATE,
                conditions::LOW_SPO2,
            ]
        );
    }

    #[test]
    fn nan_never_breaches() {
        let spec = ThresholdSpec::default();
        assert!(spec.evaluate(&reading(Some(f64::NAN), Some(f64::NAN), Some(f64::NAN))).is_empty());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let spec = ThresholdSpec::default();
        let r = reading(Some(29.0), Some(120.0), None);
        assert_eq!(spec.evaluate(&r), spec.evaluate(&r));
    }
}
