use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsState {
    pub creation: CreationSettings,
    pub accessibility: AccessibilitySettings,
    pub demo: DemoSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreationSettings {
    /// Countertop framing, no face prompts. On for new users.
    pub hands_only_mode: bool,
    pub angle_grid: bool,
    pub lighting_hint: bool,
    pub stability_reminder: bool,
}

impl Default for CreationSettings {
    fn default() -> Self {
        Self {
            hands_only_mode: true,
            angle_grid: false,
            lighting_hint: false,
            stability_reminder: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessibilitySettings {
    pub larger_text: bool,
    pub high_contrast: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationUpdate {
    pub hands_only_mode: Option<bool>,
    pub angle_grid: Option<bool>,
    pub lighting_hint: Option<bool>,
    pub stability_reminder: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityUpdate {
    pub larger_text: Option<bool>,
    pub high_contrast: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoUpdate {
    pub enabled: Option<bool>,
}

impl CreationSettings {
    pub fn merge(&mut self, update: CreationUpdate) {
        if let Some(value) = update.hands_only_mode {
            self.hands_only_mode = value;
        }
        if let Some(value) = update.angle_grid {
            self.angle_grid = value;
        }
        if let Some(value) = update.lighting_hint {
            self.lighting_hint = value;
        }
        if let Some(value) = update.stability_reminder {
            self.stability_reminder = value;
        }
    }
}

impl AccessibilitySettings {
    pub fn merge(&mut self, update: AccessibilityUpdate) {
        if let Some(value) = update.larger_text {
            self.larger_text = value;
        }
        if let Some(value) = update.high_contrast {
            self.high_contrast = value;
        }
    }
}

impl DemoSettings {
    pub fn merge(&mut self, update: DemoUpdate) {
        if let Some(value) = update.enabled {
            self.enabled = value;
        }
    }
}
