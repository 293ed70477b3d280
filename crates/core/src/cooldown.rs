//! Alert cooldown tracking.
//!
//! A breached condition should page a farmer once, not once per sample.
//! [`AlertCooldown`] remembers the last permitted send per
//! `(tag, condition)` pair and suppresses repeats inside the window.
//!
//! # Clock injection
//! `should_send` takes `now` as a parameter instead of reading the system
//! clock, so suppression is fully deterministic in tests.
//!
//! # Growth
//! Entries are overwritten in place and never evicted; the map grows to
//! (distinct tags x distinct conditions) and stays there. Bounded in
//! practice by herd size, but a known limitation of the in-memory store.

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Default suppression window: 10 minutes.
pub const DEFAULT_COOLDOWN_SECS: i64 = 600;

/// Tracks the last permitted alert per `(tag, condition)` pair.
///
/// Backed by a sharded map, so checks for different pairs do not contend
/// beyond shard granularity, and the check-and-record for one pair is a
/// single atomic step under its shard lock.
pub struct AlertCooldown {
    window: Duration,
    last_sent: DashMap<(String, String), DateTime<Utc>>,
}

impl AlertCooldown {
    /// Create a tracker with the given suppression window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_sent: DashMap::new(),
        }
    }

    /// Whether an alert for `(tag_number, condition)` may be sent at `now`.
    ///
    /// Permits iff there is no prior entry, or more than the window has
    /// elapsed since the last permitted send. On permit, `now` is recorded
    /// in the same critical section, so two concurrent breaches of the
    /// same pair cannot both pass.
    pub fn should_send(&self, tag_number: &str, condition: &str, now: DateTime<Utc>) -> bool {
        match self
            .last_sent
            .entry((tag_number.to_owned(), condition.to_owned()))
        {
            Entry::Occupied(mut entry) => {
                if now - *entry.get() > self.window {
                    entry.insert(now);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        }
    }

    /// Number of `(tag, condition)` pairs currently tracked.
    pub fn tracked_pairs(&self) -> usize {
        self.last_sent.len()
    }
}

impl Default for AlertCooldown {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_COOLDOWN_SECS))
    }
}
