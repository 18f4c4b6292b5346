//! Built-in shadow presets
//!
//! Preset catalogs are static data. Every preset layer is a black shadow cast
//! straight down (angle 0), so only distance, blur, spread and opacity vary.

use crate::{LayerTemplate, ModelError, Result};
use serde::{Deserialize, Serialize};

/// Catalog a preset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    /// Material Design elevation levels
    Material,
    /// Tailwind CSS shadow scale
    Tailwind,
}

/// One layer of a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetLayer {
    pub distance: u32,
    pub blur: u32,
    pub spread: i32,
    pub opacity: u8,
}

const fn layer(distance: u32, blur: u32, spread: i32, opacity: u8) -> PresetLayer {
    PresetLayer {
        distance,
        blur,
        spread,
        opacity,
    }
}

/// A named set of layers
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// Unique identifier
    pub id: &'static str,
    /// Display name
    pub title: &'static str,
    pub category: PresetCategory,
    pub layers: &'static [PresetLayer],
}

impl Preset {
    /// Layer templates ready for loading into a document
    pub fn templates(&self) -> Vec<LayerTemplate> {
        self.layers
            .iter()
            .map(|layer| LayerTemplate {
                visible: true,
                angle: 0,
                distance: layer.distance,
                blur: layer.blur,
                spread: layer.spread,
                color: "#000000".to_string(),
                opacity: layer.opacity,
            })
            .collect()
    }
}

static PRESETS: &[Preset] = &[
    // Material
    Preset {
        id: "material-1",
        title: "Elevation 1",
        category: PresetCategory::Material,
        layers: &[layer(2, 1, -1, 20), layer(1, 1, 0, 14), layer(1, 3, 0, 12)],
    },
    Preset {
        id: "material-2",
        title: "Elevation 2",
        category: PresetCategory::Material,
        layers: &[layer(3, 1, -2, 20), layer(2, 2, 0, 14), layer(1, 5, 0, 12)],
    },
    Preset {
        id: "material-3",
        title: "Elevation 3",
        category: PresetCategory::Material,
        layers: &[layer(3, 3, -2, 20), layer(3, 4, 0, 14), layer(1, 8, 0, 12)],
    },
    Preset {
        id: "material-4",
        title: "Elevation 4",
        category: PresetCategory::Material,
        layers: &[layer(2, 4, -1, 20), layer(4, 5, 0, 14), layer(1, 10, 0, 12)],
    },
    Preset {
        id: "material-8",
        title: "Elevation 8",
        category: PresetCategory::Material,
        layers: &[layer(5, 5, -3, 20), layer(8, 10, 1, 14), layer(3, 14, 2, 12)],
    },
    Preset {
        id: "material-16",
        title: "Elevation 16",
        category: PresetCategory::Material,
        layers: &[layer(8, 10, -5, 20), layer(16, 24, 2, 14), layer(6, 30, 5, 12)],
    },
    Preset {
        id: "material-24",
        title: "Elevation 24",
        category: PresetCategory::Material,
        layers: &[layer(11, 15, -7, 20), layer(24, 38, 3, 14), layer(9, 46, 8, 12)],
    },
    // Tailwind
    Preset {
        id: "tailwind-sm",
        title: "Small",
        category: PresetCategory::Tailwind,
        layers: &[layer(1, 2, 0, 5)],
    },
    Preset {
        id: "tailwind-default",
        title: "Default",
        category: PresetCategory::Tailwind,
        layers: &[layer(1, 3, 0, 10), layer(1, 2, 0, 6)],
    },
    Preset {
        id: "tailwind-md",
        title: "Medium",
        category: PresetCategory::Tailwind,
        layers: &[layer(4, 6, -1, 10), layer(2, 4, -1, 6)],
    },
    Preset {
        id: "tailwind-lg",
        title: "Large",
        category: PresetCategory::Tailwind,
        layers: &[layer(10, 15, -3, 10), layer(4, 6, -2, 5)],
    },
    Preset {
        id: "tailwind-xl",
        title: "Extra Large",
        category: PresetCategory::Tailwind,
        layers: &[layer(20, 25, -5, 10), layer(10, 10, -5, 4)],
    },
    Preset {
        id: "tailwind-2xl",
        title: "2XL",
        category: PresetCategory::Tailwind,
        layers: &[layer(25, 50, -12, 25)],
    },
];

/// All built-in presets, Material first
pub fn builtin_presets() -> &'static [Preset] {
    PRESETS
}

/// Presets in one catalog
pub fn presets_by_category(category: PresetCategory) -> Vec<&'static Preset> {
    PRESETS.iter().filter(|p| p.category == category).collect()
}

/// Look a preset up by id, or by title ignoring case
pub fn find_preset(key: &str) -> Result<&'static Preset> {
    PRESETS
        .iter()
        .find(|p| p.id == key || p.title.eq_ignore_ascii_case(key))
        .ok_or_else(|| ModelError::UnknownPreset(key.to_string()))
}
