//! The editable document: ordered shadow layers plus page background

use crate::{LayerId, LayerTemplate, ShadowLayer};
use serde::{Deserialize, Serialize};

/// Page background behind the preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    /// `#rrggbb`
    pub color: String,
    /// Percent, `0..=100`
    pub opacity: u8,
}

impl Background {
    pub fn new(color: impl Into<String>, opacity: u8) -> Self {
        Self {
            color: color.into(),
            opacity,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            opacity: 100,
        }
    }
}

/// The full editable state.
///
/// Layer order is z-order and CSS order. `next_id` is strictly greater than
/// every id handed out so far. A clone is a complete snapshot, which is what
/// the history log stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowDocument {
    pub shadows: Vec<ShadowLayer>,
    pub background: Background,
    pub next_id: u32,
}

impl ShadowDocument {
    /// A document with no layers
    pub fn empty() -> Self {
        Self {
            shadows: Vec::new(),
            background: Background::default(),
            next_id: 1,
        }
    }

    /// Hand out the next layer id
    pub fn allocate_id(&mut self) -> LayerId {
        let id = LayerId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a layer built from a template, returning its new id
    pub fn push_template(&mut self, template: LayerTemplate) -> LayerId {
        let id = self.allocate_id();
        self.shadows.push(template.into_layer(id));
        id
    }

    /// Replace all layers with the given templates, ids taken from the counter
    pub fn replace_layers(&mut self, templates: impl IntoIterator<Item = LayerTemplate>) {
        let layers: Vec<ShadowLayer> = templates
            .into_iter()
            .map(|template| {
                let id = self.allocate_id();
                template.into_layer(id)
            })
            .collect();
        self.shadows = layers;
    }

    pub fn layer(&self, id: LayerId) -> Option<&ShadowLayer> {
        self.shadows.iter().find(|layer| layer.id == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut ShadowLayer> {
        self.shadows.iter_mut().find(|layer| layer.id == id)
    }

    /// Remove a layer by id
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        if let Some(pos) = self.shadows.iter().position(|layer| layer.id == id) {
            self.shadows.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn visible_layers(&self) -> impl Iterator<Item = &ShadowLayer> {
        self.shadows.iter().filter(|layer| layer.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible_layers().count()
    }
}

impl Default for ShadowDocument {
    /// The session start state: one default layer with id 1
    fn default() -> Self {
        let mut document = Self::empty();
        document.push_template(LayerTemplate::default());
        document
    }
}
