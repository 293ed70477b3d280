use std::collections::HashSet;

use axum::body::Bytes;
use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc;

/// Channel sender half for pushing frames to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Outbound handle for a single live connection.
struct ConnectionHandle {
    sender: WsSender,
}

/// Tag-keyed subscription registry for live telemetry fan-out.
///
/// Holds two sharded maps: connection id to outbound channel, and tag
/// number to the set of connection ids currently watching it. Shard-level
/// locking keeps publishes for unrelated tags from serializing on one
/// lock, and delivery goes through per-connection unbounded channels, so
/// a slow or gone receiver never stalls the publisher or its neighbours.
///
/// Designed to be wrapped in `Arc` and shared across the application.
pub struct SubscriptionRegistry {
    connections: DashMap<String, ConnectionHandle>,
    topics: DashMap<String, HashSet<String>>,
}

impl SubscriptionRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            topics: DashMap::new(),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward frames to the WebSocket sink. The connection watches no
    /// tags until it subscribes.
    pub fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections
            .insert(conn_id, ConnectionHandle { sender: tx });
        rx
    }

    /// Subscribe a connection to one or more tags.
    ///
    /// Idempotent: re-subscribing an already-watched tag is a no-op.
    pub fn subscribe(&self, conn_id: &str, tags: &[String]) {
        for tag in tags {
            self.topics
                .entry(tag.clone())
                .or_default()
                .insert(conn_id.to_owned());
        }
    }

    /// Unsubscribe a connection from one or more tags.
    ///
    /// Idempotent: removing a tag the connection never watched is a no-op.
    /// Tags left without any subscriber are dropped from the map.
    pub fn unsubscribe(&self, conn_id: &str, tags: &[String]) {
        for tag in tags {
            if let Some(mut subscribers) = self.topics.get_mut(tag) {
                subscribers.remove(conn_id);
            }
            self.topics.remove_if(tag, |_, subscribers| subscribers.is_empty());
        }
    }

    /// Remove a connection and sweep it from every tag's subscriber set.
    ///
    /// Called exactly once from the socket task's cleanup path, for both
    /// orderly and abnormal disconnects, so no tag set holds a dangling
    /// connection id.
    pub fn on_connection_closed(&self, conn_id: &str) {
        self.connections.remove(conn_id);
        self.topics.retain(|_, subscribers| {
            subscribers.remove(conn_id);
            !subscribers.is_empty()
        });
    }

    /// Deliver a frame to every connection subscribed to `tag_number`.
    ///
    /// Returns the number of connections the frame was queued for. A tag
    /// with no subscribers is not an error; it delivers to zero.
    /// Connections whose send channels are closed are silently skipped
    /// (they will be cleaned up by their socket task). Frames queued from
    /// one caller arrive at each subscriber in publish order.
    pub fn publish(&self, tag_number: &str, message: Message) -> usize {
        let Some(subscribers) = self.topics.get(tag_number) else {
            return 0;
        };
        let mut delivered = 0;
        for conn_id in subscribers.iter() {
            if let Some(conn) = self.connections.get(conn_id) {
                if conn.sender.send(message.clone()).is_ok() {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Return the current number of active connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of connections currently subscribed to a tag.
    pub fn subscriber_count(&self, tag_number: &str) -> usize {
        self.topics
            .get(tag_number)
            .map(|subscribers| subscribers.len())
            .unwrap_or(0)
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub fn ping_all(&self) {
        for conn in self.connections.iter() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection, then clear both maps.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub fn shutdown_all(&self) {
        let count = self.connections.len();
        for conn in self.connections.iter() {
            let _ = conn.sender.send(Message::Close(None));
        }
        self.connections.clear();
        self.topics.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
