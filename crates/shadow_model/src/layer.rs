//! Shadow layers and their identifiers

use crate::{offset_from_polar, polar_from_offset};
use serde::{Deserialize, Serialize};

/// Identifier of a layer, unique within one editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(u32);

impl LayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LayerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A single `box-shadow` entry.
///
/// `x`/`y` always hold the projection of `angle`/`distance`. Use
/// [`ShadowLayer::set_offset`] to change the offset so both pairs stay in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowLayer {
    pub id: LayerId,
    pub visible: bool,
    /// Degrees, `0..360`
    pub angle: i32,
    /// Pixels
    pub distance: u32,
    pub x: i32,
    pub y: i32,
    /// Pixels
    pub blur: u32,
    /// Pixels, may be negative
    pub spread: i32,
    /// `#rrggbb`
    pub color: String,
    /// Percent, `0..=100`
    pub opacity: u8,
}

impl ShadowLayer {
    pub const DEFAULT_ANGLE: i32 = 90;
    pub const DEFAULT_DISTANCE: u32 = 8;
    pub const DEFAULT_BLUR: u32 = 6;
    pub const DEFAULT_SPREAD: i32 = 3;
    pub const DEFAULT_COLOR: &'static str = "#000000";
    pub const DEFAULT_OPACITY: u8 = 20;

    /// A visible layer with the editor's default parameters
    pub fn with_defaults(id: LayerId) -> Self {
        LayerTemplate::default().into_layer(id)
    }

    /// Set angle and distance, recomputing x/y
    pub fn set_offset(&mut self, angle: i32, distance: u32) {
        self.angle = angle;
        self.distance = distance;
        self.sync_xy();
    }

    /// Set x/y directly, deriving angle and distance from them
    pub fn set_xy(&mut self, x: i32, y: i32) {
        let polar = polar_from_offset(x, y);
        self.x = x;
        self.y = y;
        self.angle = polar.angle;
        self.distance = polar.distance;
    }

    /// Recompute x/y from angle and distance
    pub fn sync_xy(&mut self) {
        let offset = offset_from_polar(self.angle, self.distance);
        self.x = offset.x;
        self.y = offset.y;
    }

    /// Strip the id, e.g. to store the layer in a preset
    pub fn to_template(&self) -> LayerTemplate {
        LayerTemplate {
            visible: self.visible,
            angle: self.angle,
            distance: self.distance,
            blur: self.blur,
            spread: self.spread,
            color: self.color.clone(),
            opacity: self.opacity,
        }
    }
}

/// A layer without an id, as held by presets and decoders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerTemplate {
    pub visible: bool,
    pub angle: i32,
    pub distance: u32,
    pub blur: u32,
    pub spread: i32,
    pub color: String,
    pub opacity: u8,
}

impl LayerTemplate {
    /// Attach an id and derive x/y
    pub fn into_layer(self, id: LayerId) -> ShadowLayer {
        let offset = offset_from_polar(self.angle, self.distance);
        ShadowLayer {
            id,
            visible: self.visible,
            angle: self.angle,
            distance: self.distance,
            x: offset.x,
            y: offset.y,
            blur: self.blur,
            spread: self.spread,
            color: self.color,
            opacity: self.opacity,
        }
    }
}

impl Default for LayerTemplate {
    fn default() -> Self {
        Self {
            visible: true,
            angle: ShadowLayer::DEFAULT_ANGLE,
            distance: ShadowLayer::DEFAULT_DISTANCE,
            blur: ShadowLayer::DEFAULT_BLUR,
            spread: ShadowLayer::DEFAULT_SPREAD,
            color: ShadowLayer::DEFAULT_COLOR.to_string(),
            opacity: ShadowLayer::DEFAULT_OPACITY,
        }
    }
}
