//! Shadow Model - Core document types for the box-shadow editor
//!
//! This crate provides the shadow layer document model together with the pure
//! helpers every other crate builds on: polar/Cartesian offset conversion,
//! hex/rgba color conversion, CSS rendering and the built-in preset catalogs.

mod error;
mod geometry;
mod color;
mod layer;
mod document;
mod css;
pub mod preset;

pub use error::*;
pub use geometry::*;
pub use color::*;
pub use layer::*;
pub use document::*;
pub use css::*;
pub use preset::{builtin_presets, find_preset, presets_by_category, Preset, PresetCategory};
