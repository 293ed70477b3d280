use std::sync::Arc;
use std::time::Duration;

use crate::ws::registry::SubscriptionRegistry;

/// Interval between heartbeat pings (in seconds).
const HEARTBEAT_INTERVAL_SECS: u64 = 30;

/// Spawn a background task that sends periodic Ping frames to all
/// connected WebSocket clients.
///
/// The returned `JoinHandle` is aborted explicitly during shutdown.
pub fn start_heartbeat(registry: Arc<SubscriptionRegistry>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));

        loop {
            interval.tick().await;
            let count = registry.connection_count();
            tracing::debug!(count, "WebSocket heartbeat ping");
            registry.ping_all();
        }
    })
}
