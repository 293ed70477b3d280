use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::state::AppState;
use crate::ws::registry::SubscriptionRegistry;

/// One tag or a list of tags; dashboards send both shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagSelector {
    One(String),
    Many(Vec<String>),
}

impl TagSelector {
    fn into_tags(self) -> Vec<String> {
        match self {
            TagSelector::One(tag) => vec![tag],
            TagSelector::Many(tags) => tags,
        }
    }
}

/// Inbound control frames on the live telemetry channel.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum ClientCommand {
    Subscribe { tags: TagSelector },
    Unsubscribe { tags: TagSelector },
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is registered with the
/// [`SubscriptionRegistry`] and managed by two tasks (sender + receiver).
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.registry))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with the registry.
///   2. Spawns a sender task that forwards frames from the registry channel.
///   3. Processes inbound control frames on the current task.
///   4. Cleans up subscriptions on disconnect.
async fn handle_socket(socket: WebSocket, registry: Arc<SubscriptionRegistry>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    // Register and get the receiver for outbound frames.
    let mut rx = registry.add(conn_id.clone());

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward registry frames to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound control frames.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => handle_command(&registry, &conn_id, &text),
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: drop all subscriptions and abort the sender task. This
    // runs for abnormal disconnects too, so no tag keeps a dead entry.
    registry.on_connection_closed(&conn_id);
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Apply one inbound control frame to the registry.
///
/// Malformed frames are logged and ignored; the connection stays open.
fn handle_command(registry: &SubscriptionRegistry, conn_id: &str, text: &str) {
    match serde_json::from_str::<ClientCommand>(text) {
        Ok(ClientCommand::Subscribe { tags }) => {
            let tags = tags.into_tags();
            registry.subscribe(conn_id, &tags);
            tracing::debug!(conn_id = %conn_id, ?tags, "Subscribed to tags");
        }
        Ok(ClientCommand::Unsubscribe { tags }) => {
            let tags = tags.into_tags();
            registry.unsubscribe(conn_id, &tags);
            tracing::debug!(conn_id = %conn_id, ?tags, "Unsubscribed from tags");
        }
        Err(e) => {
            tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring malformed control frame");
        }
    }
}
