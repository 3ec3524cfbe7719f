//! Settings Tests

mod common;

use common::{shared, test_config, FlakyKv};
use cookpot::app::settings::SettingsStore;
use cookpot::domain::settings::{
    AccessibilityUpdate, CreationSettings, CreationUpdate, DemoUpdate, SettingsState,
};
use cookpot::infra::kv::MemoryKv;

const KEY: &str = "test:settings";

async fn load(kv: &MemoryKv) -> SettingsStore {
    common::init_tracing();
    SettingsStore::load(shared(kv.clone()), test_config().key("settings")).await
}

#[tokio::test]
async fn missing_key_yields_first_launch_defaults() {
    let kv = MemoryKv::new();
    let settings = load(&kv).await;

    let state = settings.get();
    assert_eq!(state, SettingsState::default());
    assert!(state.creation.hands_only_mode);
    assert!(!state.creation.angle_grid);
    assert!(!state.creation.lighting_hint);
    assert!(!state.creation.stability_reminder);
    assert!(!state.accessibility.larger_text);
    assert!(!state.accessibility.high_contrast);
    assert!(!settings.is_demo());
}

#[tokio::test]
async fn partial_update_leaves_other_fields_alone() {
    let kv = MemoryKv::new();
    let settings = load(&kv).await;

    let state = settings.set_creation(CreationUpdate {
        angle_grid: Some(true),
        ..CreationUpdate::default()
    });
    assert_eq!(
        state.creation,
        CreationSettings {
            hands_only_mode: true,
            angle_grid: true,
            lighting_hint: false,
            stability_reminder: false,
        }
    );
    assert_eq!(state.accessibility, Default::default());

    let state = settings.set_accessibility(AccessibilityUpdate {
        high_contrast: Some(true),
        ..AccessibilityUpdate::default()
    });
    assert!(state.accessibility.high_contrast);
    assert!(!state.accessibility.larger_text);
    assert!(state.creation.angle_grid);
}

#[tokio::test]
async fn demo_flag_round_trips() {
    let kv = MemoryKv::new();
    let settings = load(&kv).await;

    settings.set_demo(DemoUpdate {
        enabled: Some(true),
    });
    assert!(settings.is_demo());
    settings.set_demo(DemoUpdate::default());
    assert!(settings.is_demo());
}

#[tokio::test]
async fn stored_settings_use_camel_case() {
    let kv = MemoryKv::new();
    let settings = load(&kv).await;
    settings.set_creation(CreationUpdate {
        stability_reminder: Some(true),
        ..CreationUpdate::default()
    });
    settings.flush().await;

    let raw = kv.snapshot(KEY).unwrap();
    assert!(raw.contains("\"stabilityReminder\":true"));
    assert!(raw.contains("\"handsOnlyMode\":true"));

    let reloaded = load(&kv).await;
    assert_eq!(reloaded.get(), settings.get());
}

#[tokio::test]
async fn sparse_stored_object_fills_in_defaults() {
    let kv = MemoryKv::with_items([(KEY, r#"{"creation":{"angleGrid":true}}"#)]);
    let settings = load(&kv).await;

    let state = settings.get();
    assert!(state.creation.angle_grid);
    assert!(state.creation.hands_only_mode);
    assert!(!state.demo.enabled);
}

#[tokio::test]
async fn corrupt_stored_value_falls_back_to_defaults() {
    let kv = MemoryKv::with_items([(KEY, "{not json")]);
    let settings = load(&kv).await;
    assert_eq!(settings.get(), SettingsState::default());
}

#[tokio::test]
async fn reset_drops_the_stored_object() {
    let kv = MemoryKv::new();
    let settings = load(&kv).await;
    settings.set_accessibility(AccessibilityUpdate {
        larger_text: Some(true),
        ..AccessibilityUpdate::default()
    });
    settings.flush().await;
    assert!(kv.snapshot(KEY).is_some());

    settings.reset();
    settings.flush().await;
    assert_eq!(settings.get(), SettingsState::default());
    assert!(kv.snapshot(KEY).is_none());
}

#[tokio::test]
async fn failed_write_keeps_the_session_value() {
    common::init_tracing();
    let kv = FlakyKv::default();
    kv.fail_writes(true);
    let settings = SettingsStore::load(shared(kv.clone()), KEY).await;

    settings.set_creation(CreationUpdate {
        lighting_hint: Some(true),
        ..CreationUpdate::default()
    });
    settings.flush().await;

    assert!(settings.get().creation.lighting_hint);
    assert!(kv.inner.snapshot(KEY).is_none());
    assert_eq!(kv.writes(), 0);
}
