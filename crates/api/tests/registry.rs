//! Unit tests for `SubscriptionRegistry`.
//!
//! These tests exercise the subscription registry directly, without
//! performing any HTTP upgrades. They verify subscribe/unsubscribe
//! semantics, per-tag fan-out, disconnect cleanup, and graceful shutdown
//! behaviour.

use axum::extract::ws::Message;
use herdlink_api::ws::SubscriptionRegistry;

fn text(frame: &str) -> Message {
    Message::Text(frame.to_string().into())
}

// ---------------------------------------------------------------------------
// Test: new registry starts empty
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_registry_has_zero_connections() {
    let registry = SubscriptionRegistry::new();

    assert_eq!(registry.connection_count(), 0);
    assert_eq!(registry.subscriber_count("COW1"), 0);
}

// ---------------------------------------------------------------------------
// Test: publish reaches subscribers of that tag only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_reaches_only_subscribers_of_that_tag() {
    let registry = SubscriptionRegistry::new();

    let mut rx_a = registry.add("conn-a".to_string());
    let mut rx_b = registry.add("conn-b".to_string());
    registry.subscribe("conn-a", &["COW1".into()]);
    registry.subscribe("conn-b", &["COW2".into()]);

    let delivered = registry.publish("COW1", text("reading-1"));
    assert_eq!(delivered, 1);

    let msg = rx_a.recv().await.expect("conn-a should receive the frame");
    assert!(matches!(&msg, Message::Text(t) if *t == "reading-1"));

    // conn-b watches a different tag and must see nothing.
    assert!(rx_b.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: one connection may watch many tags
// ---------------------------------------------------------------------------

#[tokio::test]
async fn connection_can_subscribe_to_many_tags_at_once() {
    let registry = SubscriptionRegistry::new();

    let mut rx = registry.add("conn-1".to_string());
    registry.subscribe("conn-1", &["COW1".into(), "COW2".into()]);

    registry.publish("COW1", text("from-cow1"));
    registry.publish("COW2", text("from-cow2"));

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert!(matches!(&first, Message::Text(t) if *t == "from-cow1"));
    assert!(matches!(&second, Message::Text(t) if *t == "from-cow2"));
}

// ---------------------------------------------------------------------------
// Test: subscribing twice is the same as subscribing once
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_subscribe_is_idempotent() {
    let registry = SubscriptionRegistry::new();

    let mut rx = registry.add("conn-1".to_string());
    registry.subscribe("conn-1", &["COW1".into()]);
    registry.subscribe("conn-1", &["COW1".into()]);

    assert_eq!(registry.subscriber_count("COW1"), 1);
    assert_eq!(registry.publish("COW1", text("once")), 1);

    let _ = rx.recv().await.unwrap();
    // No duplicate delivery queued.
    assert!(rx.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: unsubscribe stops delivery; unknown tags are a no-op
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unsubscribe_stops_delivery() {
    let registry = SubscriptionRegistry::new();

    let mut rx = registry.add("conn-1".to_string());
    registry.subscribe("conn-1", &["COW1".into()]);
    registry.unsubscribe("conn-1", &["COW1".into()]);

    assert_eq!(registry.publish("COW1", text("dropped")), 0);
    assert!(rx.try_recv().is_err());

    // Unsubscribing a tag that was never watched must not panic.
    registry.unsubscribe("conn-1", &["COW9".into()]);
}

// ---------------------------------------------------------------------------
// Test: publishing to a tag nobody watches delivers to zero
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_to_unknown_tag_delivers_to_zero() {
    let registry = SubscriptionRegistry::new();

    let _rx = registry.add("conn-1".to_string());

    assert_eq!(registry.publish("GHOST", text("nobody")), 0);
}

// ---------------------------------------------------------------------------
// Test: frames arrive in publish order for a single tag
// ---------------------------------------------------------------------------

#[tokio::test]
async fn frames_for_one_tag_arrive_in_publish_order() {
    let registry = SubscriptionRegistry::new();

    let mut rx = registry.add("conn-1".to_string());
    registry.subscribe("conn-1", &["COW1".into()]);

    for frame in ["first", "second", "third"] {
        registry.publish("COW1", text(frame));
    }

    for expected in ["first", "second", "third"] {
        let msg = rx.recv().await.unwrap();
        assert!(
            matches!(&msg, Message::Text(t) if *t == expected),
            "Expected {expected}, got: {msg:?}"
        );
    }
}

// ---------------------------------------------------------------------------
// Test: connection close sweeps every subscription
// ---------------------------------------------------------------------------

#[tokio::test]
async fn connection_close_removes_all_subscriptions() {
    let registry = SubscriptionRegistry::new();

    let _rx1 = registry.add("conn-1".to_string());
    let mut rx2 = registry.add("conn-2".to_string());
    registry.subscribe("conn-1", &["COW1".into(), "COW2".into()]);
    registry.subscribe("conn-2", &["COW1".into()]);

    registry.on_connection_closed("conn-1");

    assert_eq!(registry.connection_count(), 1);
    assert_eq!(registry.subscriber_count("COW1"), 1);
    assert_eq!(registry.subscriber_count("COW2"), 0);

    // The surviving connection still receives.
    assert_eq!(registry.publish("COW1", text("still-on")), 1);
    let msg = rx2.recv().await.unwrap();
    assert!(matches!(&msg, Message::Text(t) if *t == "still-on"));
}

// ---------------------------------------------------------------------------
// Test: a gone receiver is skipped without stalling the others
// ---------------------------------------------------------------------------

#[tokio::test]
async fn closed_channel_is_skipped() {
    let registry = SubscriptionRegistry::new();

    let rx_gone = registry.add("conn-1".to_string());
    let mut rx_live = registry.add("conn-2".to_string());
    registry.subscribe("conn-1", &["COW1".into()]);
    registry.subscribe("conn-2", &["COW1".into()]);

    // Drop conn-1's receiver to close its channel.
    drop(rx_gone);

    assert_eq!(registry.publish("COW1", text("still alive")), 1);

    let msg = rx_live.recv().await.expect("conn-2 should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "still alive"));
}

// ---------------------------------------------------------------------------
// Test: shutdown_all sends Close and clears all state
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let registry = SubscriptionRegistry::new();

    let mut rx1 = registry.add("conn-1".to_string());
    let mut rx2 = registry.add("conn-2".to_string());
    registry.subscribe("conn-1", &["COW1".into()]);
    assert_eq!(registry.connection_count(), 2);

    registry.shutdown_all();

    assert_eq!(registry.connection_count(), 0);
    assert_eq!(registry.subscriber_count("COW1"), 0);

    let msg1 = rx1.recv().await.expect("rx1 should receive Close");
    assert!(
        matches!(msg1, Message::Close(None)),
        "Expected Close(None), got: {msg1:?}"
    );

    let msg2 = rx2.recv().await.expect("rx2 should receive Close");
    assert!(
        matches!(msg2, Message::Close(None)),
        "Expected Close(None), got: {msg2:?}"
    );

    // After Close, the channel should be closed (no more messages).
    assert!(
        rx1.recv().await.is_none(),
        "Channel should be closed after shutdown"
    );
}
