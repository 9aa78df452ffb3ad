use serde::{Deserialize, Serialize};

/// User preferences kept in the settings store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
    pub dark_mode: bool,
    /// Persist the running game after every throw so it can be resumed
    pub auto_save_games: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            vibration_enabled: true,
            dark_mode: false,
            auto_save_games: true,
        }
    }
}

/// Settings that can be toggled by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Sound,
    Vibration,
    DarkMode,
    AutoSave,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Sound => "sound",
            SettingKey::Vibration => "vibration",
            SettingKey::DarkMode => "dark-mode",
            SettingKey::AutoSave => "auto-save",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sound" => Some(SettingKey::Sound),
            "vibration" => Some(SettingKey::Vibration),
            "dark-mode" => Some(SettingKey::DarkMode),
            "auto-save" => Some(SettingKey::AutoSave),
            _ => None,
        }
    }
}

impl AppSettings {
    /// Copy of the settings with one toggle changed
    pub fn with(&self, key: SettingKey, enabled: bool) -> Self {
        let mut settings = self.clone();
        match key {
            SettingKey::Sound => settings.sound_enabled = enabled,
            SettingKey::Vibration => settings.vibration_enabled = enabled,
            SettingKey::DarkMode => settings.dark_mode = enabled,
            SettingKey::AutoSave => settings.auto_save_games = enabled,
        }
        settings
    }
}
