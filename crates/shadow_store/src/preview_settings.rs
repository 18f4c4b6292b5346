//! Preview card settings
//!
//! The preview area renders the current shadow on a handful of sample cards.
//! Its display settings live under their own storage key, independent of the
//! editor history, and go through the same obfuscated persistence.

use crate::{load_obfuscated, save_obfuscated, KeyValueStore, Result};
use serde::{Deserialize, Serialize};

/// Storage key for preview settings
pub const PREVIEW_SETTINGS_KEY: &str = "shadows-preview-settings";

/// All preview settings.
///
/// Every level is `#[serde(default)]` so stored settings from older versions
/// merge over the defaults field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewSettings {
    pub page: PageSettings,
    pub preview_cards: CardSettings,
    pub view: PreviewView,
    pub num_items: u32,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            page: PageSettings::default(),
            preview_cards: CardSettings::default(),
            view: PreviewView::Varied,
            num_items: 3,
        }
    }
}

/// Page behind the preview cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSettings {
    pub background_color: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
        }
    }
}

/// Appearance of each preview card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardSettings {
    pub background_color: String,
    /// In `rem`
    pub border_radius: f64,
    /// In `vh`
    pub height: f64,
    /// In `vw`
    pub width: f64,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            border_radius: CardDimension::BorderRadius.slider().default,
            height: CardDimension::Height.slider().default,
            width: CardDimension::Width.slider().default,
        }
    }
}

/// Card layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewView {
    /// Uniform grid of identical cards
    Grid,
    /// Small, medium and large cards side by side
    Varied,
}

/// Card dimensions adjustable with a slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardDimension {
    BorderRadius,
    Height,
    Width,
}

/// Slider range and unit for a card dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: &'static str,
}

impl CardDimension {
    pub fn slider(&self) -> SliderConfig {
        match self {
            Self::BorderRadius => SliderConfig {
                default: 0.5,
                min: 0.0,
                max: 15.0,
                step: 0.01,
                unit: "rem",
            },
            Self::Height => SliderConfig {
                default: 28.0,
                min: 0.0,
                max: 100.0,
                step: 0.01,
                unit: "vh",
            },
            Self::Width => SliderConfig {
                default: 21.0,
                min: 0.0,
                max: 100.0,
                step: 1.0,
                unit: "vw",
            },
        }
    }

    /// Render a value with its CSS unit, e.g. `0.5rem`
    pub fn format_value(&self, value: f64) -> String {
        format!("{}{}", value, self.slider().unit)
    }
}

/// A card in the varied layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariedItem {
    pub kind: &'static str,
    pub width: &'static str,
    pub height: &'static str,
}

/// Cards shown by [`PreviewView::Varied`]
pub const VARIED_VIEW_ITEMS: [VariedItem; 3] = [
    VariedItem { kind: "small", width: "10vw", height: "2.5rem" },
    VariedItem { kind: "medium", width: "10vw", height: "10vw" },
    VariedItem { kind: "large", width: "20vw", height: "20vw" },
];

/// Preview settings manager for loading, saving, and updating settings
pub struct PreviewSettingsManager {
    store: Box<dyn KeyValueStore>,
    key: String,
    current: PreviewSettings,
}

impl PreviewSettingsManager {
    /// Create a manager over the given storage
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: PREVIEW_SETTINGS_KEY.to_string(),
            current: PreviewSettings::default(),
        }
    }

    /// Use a different storage key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Load settings, falling back to defaults when nothing usable is stored
    pub fn load(&mut self) -> &PreviewSettings {
        self.current = load_obfuscated(self.store.as_ref(), &self.key).unwrap_or_default();
        &self.current
    }

    /// Save current settings
    pub fn save(&self) -> Result<()> {
        save_obfuscated(self.store.as_ref(), &self.key, &self.current)
    }

    /// Get current settings
    pub fn get(&self) -> &PreviewSettings {
        &self.current
    }

    /// Update settings and save
    pub fn update(&mut self, settings: PreviewSettings) -> Result<()> {
        self.current = settings;
        self.save()
    }

    /// Reset settings to defaults and save
    pub fn reset(&mut self) -> Result<&PreviewSettings> {
        self.current = PreviewSettings::default();
        self.save()?;
        Ok(&self.current)
    }

    /// Remove stored settings, keeping defaults in memory
    pub fn clear(&mut self) -> Result<()> {
        self.current = PreviewSettings::default();
        self.store.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{obfuscate, FileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = PreviewSettings::default();
        assert_eq!(settings.page.background_color, "#ffffff");
        assert_eq!(settings.preview_cards.border_radius, 0.5);
        assert_eq!(settings.preview_cards.height, 28.0);
        assert_eq!(settings.preview_cards.width, 21.0);
        assert_eq!(settings.view, PreviewView::Varied);
        assert_eq!(settings.num_items, 3);
    }

    #[test]
    fn test_view_serialization() {
        assert_eq!(serde_json::to_string(&PreviewView::Grid).unwrap(), "\"grid\"");
        assert_eq!(serde_json::to_string(&PreviewView::Varied).unwrap(), "\"varied\"");
    }

    #[test]
    fn test_partial_settings_merge_with_defaults() {
        let store = MemoryStore::new();
        store
            .set(PREVIEW_SETTINGS_KEY, &obfuscate(r#"{"view":"grid","previewCards":{"height":40}}"#))
            .unwrap();

        let mut manager = PreviewSettingsManager::new(Box::new(store));
        let settings = manager.load();
        assert_eq!(settings.view, PreviewView::Grid);
        assert_eq!(settings.preview_cards.height, 40.0);
        assert_eq!(settings.preview_cards.width, 21.0);
        assert_eq!(settings.num_items, 3);
    }

    #[test]
    fn test_plain_json_settings_are_accepted() {
        let store = MemoryStore::new();
        store.set(PREVIEW_SETTINGS_KEY, r#"{"numItems":6}"#).unwrap();
        let mut manager = PreviewSettingsManager::new(Box::new(store));
        assert_eq!(manager.load().num_items, 6);
    }

    #[test]
    fn test_manager_load_save_with_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = PreviewSettingsManager::new(Box::new(FileStore::new(temp_dir.path())));
        assert_eq!(manager.load(), &PreviewSettings::default());

        let mut settings = PreviewSettings::default();
        settings.page.background_color = "#101010".to_string();
        settings.num_items = 5;
        manager.update(settings).unwrap();

        let mut manager2 = PreviewSettingsManager::new(Box::new(FileStore::new(temp_dir.path())));
        let loaded = manager2.load();
        assert_eq!(loaded.page.background_color, "#101010");
        assert_eq!(loaded.num_items, 5);
    }

    #[test]
    fn test_reset_and_clear() {
        let store = MemoryStore::new();
        let mut manager = PreviewSettingsManager::new(Box::new(store.clone()));
        let mut settings = PreviewSettings::default();
        settings.view = PreviewView::Grid;
        manager.update(settings).unwrap();

        assert_eq!(manager.reset().unwrap().view, PreviewView::Varied);
        manager.clear().unwrap();
        assert!(store.get(PREVIEW_SETTINGS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(CardDimension::BorderRadius.format_value(0.5), "0.5rem");
        assert_eq!(CardDimension::Width.format_value(21.0), "21vw");
        assert_eq!(CardDimension::Height.slider().max, 100.0);
    }
}
