//! Tests for auto-sync reconciliation: enable/disable, interval sanitization
//! and idempotence.

#[path = "../common/mod.rs"]
mod common;

use common::{scheduler_for, FakeHost};
use rstest::rstest;
use serde_json::{json, Value};
use unibrowser_sync::services::auto_sync_scheduler::AutoSyncState;
use unibrowser_sync::types::config::DEFAULT_TIMER_NAME;
use unibrowser_sync::types::errors::SettingsError;
use unibrowser_sync::types::settings::{AUTO_SYNC_ENABLED, AUTO_SYNC_INTERVAL};

#[rstest]
#[case::zero(Some(json!(0)), 15)]
#[case::negative(Some(json!(-5)), 15)]
#[case::not_a_number(Some(json!("abc")), 15)]
#[case::absent(None, 15)]
#[case::null(Some(Value::Null), 15)]
#[case::valid(Some(json!(42)), 42)]
#[case::numeric_string(Some(json!("30")), 30)]
#[case::trailing_garbage(Some(json!("20min")), 20)]
#[case::fraction(Some(json!(7.9)), 7)]
#[tokio::test]
async fn test_interval_sanitization(#[case] stored: Option<Value>, #[case] expected: u64) {
    let host = FakeHost::chrome();
    host.put_setting(AUTO_SYNC_ENABLED, json!(true));
    if let Some(value) = stored {
        host.put_setting(AUTO_SYNC_INTERVAL, value);
    }

    let state = scheduler_for(&host).reconcile().await.unwrap();

    assert_eq!(state, AutoSyncState::Enabled { period_minutes: expected });
    assert_eq!(host.timer(DEFAULT_TIMER_NAME), Some(expected));
}

#[tokio::test]
async fn test_reconcile_twice_leaves_one_timer() {
    let host = FakeHost::chrome();
    host.put_setting(AUTO_SYNC_ENABLED, json!(true));
    host.put_setting(AUTO_SYNC_INTERVAL, json!(10));
    let scheduler = scheduler_for(&host);

    scheduler.reconcile().await.unwrap();
    scheduler.reconcile().await.unwrap();

    assert_eq!(host.timers().len(), 1);
    assert_eq!(host.timer(DEFAULT_TIMER_NAME), Some(10));
}

#[tokio::test]
async fn test_disable_removes_existing_timer() {
    let host = FakeHost::chrome();
    host.install_timer(DEFAULT_TIMER_NAME, 15);
    host.put_setting(AUTO_SYNC_ENABLED, json!(false));

    let state = scheduler_for(&host).reconcile().await.unwrap();

    assert_eq!(state, AutoSyncState::Disabled);
    assert!(host.timers().is_empty());
    assert_eq!(host.timer_creations(), 0);
}

#[tokio::test]
async fn test_disable_without_timer_is_noop() {
    let host = FakeHost::chrome();
    let scheduler = scheduler_for(&host);

    assert_eq!(scheduler.reconcile().await.unwrap(), AutoSyncState::Disabled);
    assert_eq!(scheduler.reconcile().await.unwrap(), AutoSyncState::Disabled);
    assert!(host.timers().is_empty());
}

#[rstest]
#[case::empty_string(json!(""), false)]
#[case::zero(json!(0), false)]
#[case::null(Value::Null, false)]
#[case::string_false(json!("false"), true)]
#[case::one(json!(1), true)]
#[case::object(json!({}), true)]
#[tokio::test]
async fn test_enabled_flag_truthiness(#[case] flag: Value, #[case] enabled: bool) {
    let host = FakeHost::chrome();
    host.put_setting(AUTO_SYNC_ENABLED, flag);

    let state = scheduler_for(&host).reconcile().await.unwrap();

    assert_eq!(state != AutoSyncState::Disabled, enabled);
    assert_eq!(host.timer(DEFAULT_TIMER_NAME).is_some(), enabled);
}

#[tokio::test]
async fn test_interval_change_replaces_timer() {
    let host = FakeHost::chrome();
    host.put_setting(AUTO_SYNC_ENABLED, json!(true));
    let scheduler = scheduler_for(&host);

    scheduler.reconcile().await.unwrap();
    host.put_setting(AUTO_SYNC_INTERVAL, json!(60));
    scheduler.reconcile().await.unwrap();

    assert_eq!(host.timers().len(), 1);
    assert_eq!(host.timer(DEFAULT_TIMER_NAME), Some(60));
}

#[tokio::test]
async fn test_settings_read_failure_leaves_timers_untouched() {
    let host = FakeHost::chrome();
    host.install_timer(DEFAULT_TIMER_NAME, 15);
    host.fail_settings(true);

    let err = scheduler_for(&host).reconcile().await.unwrap_err();

    assert!(matches!(err, SettingsError::Read(_)));
    assert_eq!(host.timer(DEFAULT_TIMER_NAME), Some(15));
}
