use std::sync::Arc;

use crate::domain::settings::{AccessibilityUpdate, CreationUpdate, DemoUpdate, SettingsState};
use crate::infra::kv::KeyValueStore;
use crate::infra::store::PersistentStore;

#[derive(Clone)]
pub struct SettingsStore {
    store: PersistentStore<SettingsState>,
}

impl SettingsStore {
    pub async fn load(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store: PersistentStore::load(kv, key, SettingsState::default()).await,
        }
    }

    pub fn store(&self) -> &PersistentStore<SettingsState> {
        &self.store
    }

    pub fn get(&self) -> SettingsState {
        self.store.get()
    }

    pub fn set_creation(&self, update: CreationUpdate) -> SettingsState {
        self.store.mutate(|settings| {
            settings.creation.merge(update);
            settings.clone()
        })
    }

    pub fn set_accessibility(&self, update: AccessibilityUpdate) -> SettingsState {
        self.store.mutate(|settings| {
            settings.accessibility.merge(update);
            settings.clone()
        })
    }

    pub fn set_demo(&self, update: DemoUpdate) -> SettingsState {
        self.store.mutate(|settings| {
            settings.demo.merge(update);
            settings.clone()
        })
    }

    pub fn is_demo(&self) -> bool {
        self.store.read(|settings| settings.demo.enabled)
    }

    /// Back to first-launch defaults; the stored object is dropped.
    pub fn reset(&self) {
        self.store.reset();
    }

    pub async fn flush(&self) {
        self.store.flush().await;
    }
}
