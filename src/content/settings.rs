//! Site settings record and theme preference

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BlogError, Result};
use crate::storage::{load_json, store_json, Keys, Storage};

/// Editable site texts, saved as a single record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub site_title: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub profile_desc: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_title: "localblog".to_string(),
            hero_title: "Welcome to my tech blog".to_string(),
            hero_subtitle: "Security learner | Notes on growth and knowledge".to_string(),
            profile_desc: "Curious about security, writing down what I learn along the way."
                .to_string(),
        }
    }
}

// Records written by older versions may miss fields
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredSettings {
    site_title: Option<String>,
    hero_title: Option<String>,
    hero_subtitle: Option<String>,
    profile_desc: Option<String>,
}

impl StoredSettings {
    fn fill(self, defaults: &Settings) -> Settings {
        let pick = |value: Option<String>, default: &str| {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Settings {
            site_title: pick(self.site_title, &defaults.site_title),
            hero_title: pick(self.hero_title, &defaults.hero_title),
            hero_subtitle: pick(self.hero_subtitle, &defaults.hero_subtitle),
            profile_desc: pick(self.profile_desc, &defaults.profile_desc),
        }
    }
}

/// Color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Blue,
    Green,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Light, Theme::Dark, Theme::Blue, Theme::Green];

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Blue => "blue",
            Theme::Green => "green",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = BlogError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| {
                BlogError::validation(format!(
                    "Unknown theme: {}. Available: light, dark, blue, green",
                    s
                ))
            })
    }
}

/// Reads and writes the settings record and the theme preference
pub struct SettingsStore<'a, S: Storage + ?Sized> {
    storage: &'a S,
    keys: &'a Keys,
    defaults: &'a Settings,
}

impl<'a, S: Storage + ?Sized> SettingsStore<'a, S> {
    /// Create a settings store; `defaults` fill in anything not saved yet
    pub fn new(storage: &'a S, keys: &'a Keys, defaults: &'a Settings) -> Self {
        Self {
            storage,
            keys,
            defaults,
        }
    }

    /// Current settings
    pub fn load(&self) -> Result<Settings> {
        let stored: Option<StoredSettings> = load_json(self.storage, &self.keys.settings())?;
        Ok(stored.unwrap_or_default().fill(self.defaults))
    }

    /// Replace the whole settings record
    pub fn save(&self, settings: &Settings) -> Result<()> {
        store_json(self.storage, &self.keys.settings(), settings)?;
        tracing::info!("Saved site settings");
        Ok(())
    }

    /// Drop the saved record so the defaults apply again
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(&self.keys.settings())?;
        tracing::info!("Cleared site settings");
        Ok(())
    }

    /// Stored theme preference, if any
    pub fn theme(&self) -> Result<Option<Theme>> {
        load_json(self.storage, &self.keys.theme())
    }

    /// Remember a theme preference
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        store_json(self.storage, &self.keys.theme(), &theme)?;
        tracing::debug!("Theme preference set to {}", theme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_when_nothing_saved() {
        let storage = MemoryStorage::new();
        let keys = Keys::default();
        let defaults = Settings::default();
        let store = SettingsStore::new(&storage, &keys, &defaults);

        assert_eq!(store.load().unwrap(), defaults);
        assert_eq!(store.theme().unwrap(), None);
    }

    #[test]
    fn test_save_overwrites_whole_record() {
        let storage = MemoryStorage::new();
        let keys = Keys::default();
        let defaults = Settings::default();
        let store = SettingsStore::new(&storage, &keys, &defaults);

        let settings = Settings {
            site_title: "kon's notes".to_string(),
            hero_title: "Hi".to_string(),
            hero_subtitle: "Sub".to_string(),
            profile_desc: "Desc".to_string(),
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);

        let raw = storage.get(&keys.settings()).unwrap().unwrap();
        assert!(raw.contains("\"siteTitle\":\"kon's notes\""));
    }

    #[test]
    fn test_partial_record_uses_defaults() {
        let storage = MemoryStorage::new();
        let keys = Keys::default();
        let defaults = Settings::default();
        storage
            .set(&keys.settings(), r#"{"siteTitle": "Only title", "heroTitle": ""}"#)
            .unwrap();

        let settings = SettingsStore::new(&storage, &keys, &defaults).load().unwrap();
        assert_eq!(settings.site_title, "Only title");
        assert_eq!(settings.hero_title, defaults.hero_title);
        assert_eq!(settings.profile_desc, defaults.profile_desc);
    }

    #[test]
    fn test_theme_roundtrip() {
        let storage = MemoryStorage::new();
        let keys = Keys::default();
        let defaults = Settings::default();
        let store = SettingsStore::new(&storage, &keys, &defaults);

        store.set_theme("Dark".parse().unwrap()).unwrap();
        assert_eq!(store.theme().unwrap(), Some(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());

        assert_eq!("blue".parse::<Theme>().unwrap(), Theme::Blue);
        assert_eq!(" GREEN ".parse::<Theme>().unwrap(), Theme::Green);
    }

    #[test]
    fn test_every_theme_reads_back() {
        let storage = MemoryStorage::new();
        let keys = Keys::default();
        let defaults = Settings::default();
        let store = SettingsStore::new(&storage, &keys, &defaults);

        storage.set(&keys.theme(), "\"green\"").unwrap();
        assert_eq!(store.theme().unwrap(), Some(Theme::Green));

        for theme in Theme::ALL {
            store.set_theme(theme).unwrap();
            assert_eq!(store.theme().unwrap(), Some(theme));
        }
    }

    #[test]
    fn test_clear_restores_defaults() {
        let storage = MemoryStorage::new();
        let keys = Keys::default();
        let defaults = Settings::default();
        let store = SettingsStore::new(&storage, &keys, &defaults);

        let mut settings = defaults.clone();
        settings.hero_title = "Changed".to_string();
        store.save(&settings).unwrap();
        store.set_theme(Theme::Blue).unwrap();

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), defaults);
        assert_eq!(store.theme().unwrap(), Some(Theme::Blue));
    }
}
