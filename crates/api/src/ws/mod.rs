//! WebSocket infrastructure for the live telemetry channel.
//!
//! Provides the tag-keyed subscription registry, heartbeat monitoring,
//! and the HTTP upgrade handler used by Axum routes.

mod handler;
mod heartbeat;
pub mod registry;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use registry::SubscriptionRegistry;
