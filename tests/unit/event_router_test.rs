//! Tests for event routing: message replies, timer fires and lifecycle events.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use common::{executor_for, sample_tree, scheduler_for, FakeHost};
use serde_json::{json, Value};
use tokio::sync::oneshot;
use unibrowser_sync::event_router::EventRouter;
use unibrowser_sync::platform::host::{Host, HostEvent, LifecycleEvent};
use unibrowser_sync::types::config::DEFAULT_TIMER_NAME;
use unibrowser_sync::types::settings::{AUTO_SYNC_ENABLED, AUTO_SYNC_INTERVAL, DEVICE_NAME, PROFILE_NAME};

fn router_for(host: &Arc<FakeHost>) -> EventRouter {
    let dyn_host: Arc<dyn Host> = host.clone();
    EventRouter::new(dyn_host, executor_for(host), scheduler_for(host))
}

fn uploaded_body(host: &FakeHost, index: usize) -> Value {
    serde_json::from_slice(&host.requests()[index].body).unwrap()
}

// === Messages ===

#[tokio::test]
async fn test_sync_message_replies_with_result() {
    let host = FakeHost::chrome();
    host.set_tree(sample_tree());
    host.respond(200, r#"{"inserted":2}"#);

    let reply = router_for(&host)
        .on_message(&json!({"type": "SYNC_BOOKMARKS", "meta": {"device_name": "Desk"}}))
        .await
        .unwrap();

    assert!(reply.ok);
    assert_eq!(reply.result, Some(json!({"inserted": 2})));
    assert_eq!(reply.error, None);
    assert_eq!(uploaded_body(&host, 0)["device_name"], "Desk");
    assert_eq!(uploaded_body(&host, 0)["browser_name"], "Chrome");
}

#[tokio::test]
async fn test_sync_message_without_meta_uses_defaults() {
    let host = FakeHost::chrome();

    let reply = router_for(&host)
        .on_message(&json!({"type": "SYNC_BOOKMARKS"}))
        .await
        .unwrap();

    assert!(reply.ok);
    let body = uploaded_body(&host, 0);
    assert_eq!(body["device_name"], "Laptop Lokal");
    assert_eq!(body["profile_name"], "Default");
}

#[tokio::test]
async fn test_sync_message_failure_replies_with_error() {
    let host = FakeHost::chrome();
    host.set_tree(sample_tree());
    host.respond(500, "boom");

    let reply = router_for(&host)
        .on_message(&json!({"type": "SYNC_BOOKMARKS"}))
        .await
        .unwrap();

    assert!(!reply.ok);
    assert_eq!(reply.error.as_deref(), Some("HTTP 500: boom"));
    assert_eq!(
        serde_json::to_value(&reply).unwrap(),
        json!({"ok": false, "error": "HTTP 500: boom"})
    );
    assert_eq!(host.requests().len(), 1);
}

#[tokio::test]
async fn test_update_settings_reconciles_and_acknowledges() {
    let host = FakeHost::chrome();
    host.put_setting(AUTO_SYNC_ENABLED, json!(true));
    host.put_setting(AUTO_SYNC_INTERVAL, json!(5));

    let reply = router_for(&host)
        .on_message(&json!({"type": "UPDATE_SETTINGS"}))
        .await
        .unwrap();

    assert_eq!(serde_json::to_value(&reply).unwrap(), json!({"ok": true}));
    assert_eq!(host.timer(DEFAULT_TIMER_NAME), Some(5));
}

#[tokio::test]
async fn test_update_settings_read_failure_replies_with_error() {
    let host = FakeHost::chrome();
    host.fail_settings(true);

    let reply = router_for(&host)
        .on_message(&json!({"type": "UPDATE_SETTINGS"}))
        .await
        .unwrap();

    assert!(!reply.ok);
    assert!(reply.error.unwrap().starts_with("Settings read failed"));
}

#[tokio::test]
async fn test_unrecognized_messages_get_no_reply() {
    let host = FakeHost::chrome();
    let router = router_for(&host);

    for message in [
        json!({"type": "SOMETHING_ELSE"}),
        json!({"meta": {}}),
        json!({"type": 42}),
        json!("SYNC_BOOKMARKS"),
        json!(null),
    ] {
        assert!(router.on_message(&message).await.is_none(), "{}", message);
    }
    assert!(host.requests().is_empty());
}

// === Timer fires ===

#[tokio::test]
async fn test_matching_timer_syncs_with_stored_metadata() {
    let host = FakeHost::chrome();
    host.set_tree(sample_tree());
    host.put_setting(DEVICE_NAME, json!("Office"));
    host.put_setting(PROFILE_NAME, json!(""));

    router_for(&host).on_timer_fired(DEFAULT_TIMER_NAME).await;

    assert_eq!(host.requests().len(), 1);
    let body = uploaded_body(&host, 0);
    assert_eq!(body["device_name"], "Office");
    assert_eq!(body["profile_name"], "Default");
    assert_eq!(body["browser_name"], "Chrome");
}

#[tokio::test]
async fn test_other_timer_names_are_ignored() {
    let host = FakeHost::chrome();

    router_for(&host).on_timer_fired("someOtherAlarm").await;

    assert!(host.requests().is_empty());
}

#[tokio::test]
async fn test_timer_sync_failure_is_only_logged() {
    let host = FakeHost::chrome();
    host.respond(500, "boom");

    router_for(&host).on_timer_fired(DEFAULT_TIMER_NAME).await;

    assert_eq!(host.requests().len(), 1);
}

#[tokio::test]
async fn test_timer_with_unreadable_settings_does_not_upload() {
    let host = FakeHost::chrome();
    host.fail_settings(true);

    router_for(&host).on_timer_fired(DEFAULT_TIMER_NAME).await;

    assert!(host.requests().is_empty());
}

// === Lifecycle and dispatch ===

#[tokio::test]
async fn test_lifecycle_events_reconcile() {
    for event in [LifecycleEvent::Installed, LifecycleEvent::Startup] {
        let host = FakeHost::chrome();
        host.put_setting(AUTO_SYNC_ENABLED, json!(true));

        router_for(&host).on_lifecycle(event).await;

        assert_eq!(host.timer(DEFAULT_TIMER_NAME), Some(15));
    }
}

#[tokio::test]
async fn test_dispatch_sends_reply_through_channel() {
    let host = FakeHost::chrome();
    let (tx, rx) = oneshot::channel();

    router_for(&host)
        .dispatch(HostEvent::Message {
            message: json!({"type": "UPDATE_SETTINGS"}),
            reply: Some(tx),
        })
        .await;

    assert!(rx.await.unwrap().ok);
}

#[tokio::test]
async fn test_dispatch_drops_reply_for_unknown_message() {
    let host = FakeHost::chrome();
    let (tx, rx) = oneshot::channel();

    router_for(&host)
        .dispatch(HostEvent::Message {
            message: json!({"type": "PING"}),
            reply: Some(tx),
        })
        .await;

    assert!(rx.await.is_err());
}

#[tokio::test]
async fn test_dispatch_timer_event() {
    let host = FakeHost::chrome();

    router_for(&host)
        .dispatch(HostEvent::TimerFired(DEFAULT_TIMER_NAME.to_string()))
        .await;

    assert_eq!(host.requests().len(), 1);
}
