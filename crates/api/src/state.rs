use std::sync::Arc;

use herdlink_core::{AlertCooldown, ThresholdSpec};
use herdlink_db::{DbPool, ReadingStore};

use crate::config::ServerConfig;
use crate::notify::AlertNotifier;
use crate::ws::SubscriptionRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The store and notifier are trait objects so integration tests can swap
/// in-memory doubles for the external collaborators.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks; the pipeline writes via `store`).
    pub pool: DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Tag-keyed subscription registry (dashboard fan-out).
    pub registry: Arc<SubscriptionRegistry>,
    /// Static medical threshold configuration.
    pub thresholds: Arc<ThresholdSpec>,
    /// Per-(tag, condition) alert suppression.
    pub cooldown: Arc<AlertCooldown>,
    /// Durable sink for alert-triggering readings.
    pub store: Arc<dyn ReadingStore>,
    /// Push-notification collaborator.
    pub notifier: Arc<dyn AlertNotifier>,
}
