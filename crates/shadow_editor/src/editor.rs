//! The live document and every mutation on it

use crate::{describe_change, FieldUpdate, History, Result, UrlLocation};
use shadow_model::{
    css_declaration, css_with_vendor_prefixes, find_preset, normalize_hex, Background, LayerId,
    LayerTemplate, Preset, ShadowDocument, ShadowLayer,
};
use shadow_store::{decode_query, to_query, ShadowCodec};

/// Result of an undo or redo request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryOutcome {
    /// Whether a snapshot was installed
    pub applied: bool,
    /// What changed, for user feedback
    pub description: Option<String>,
}

/// Owns the live document.
///
/// Structural mutations re-encode the document into the URL and then record a
/// history snapshot. Snapshots installed by undo/redo go through the same URL
/// sync but are never recorded again.
pub struct ShadowEditor {
    document: ShadowDocument,
    history: History,
    location: Box<dyn UrlLocation>,
    codec: ShadowCodec,
    /// Set while a history snapshot is being installed
    applying_history: bool,
    /// Whether startup restoration already ran
    initialized: bool,
}

impl ShadowEditor {
    /// Create an editor holding the default document
    pub fn new(history: History, location: Box<dyn UrlLocation>) -> Self {
        Self {
            document: ShadowDocument::default(),
            history,
            location,
            codec: ShadowCodec::new(),
            applying_history: false,
            initialized: false,
        }
    }

    /// Replace the codec, e.g. to register extra decoders
    pub fn with_codec(mut self, codec: ShadowCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn document(&self) -> &ShadowDocument {
        &self.document
    }

    pub fn shadows(&self) -> &[ShadowLayer] {
        &self.document.shadows
    }

    pub fn layer(&self, id: LayerId) -> Option<&ShadowLayer> {
        self.document.layer(id)
    }

    pub fn visible_shadows(&self) -> impl Iterator<Item = &ShadowLayer> {
        self.document.visible_layers()
    }

    pub fn background(&self) -> &Background {
        &self.document.background
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn location(&self) -> &dyn UrlLocation {
        self.location.as_ref()
    }

    /// `box-shadow: ...;` for the visible layers, empty when none are visible
    pub fn css(&self) -> String {
        css_declaration(self.document.visible_layers())
    }

    pub fn css_with_vendor_prefixes(&self) -> String {
        css_with_vendor_prefixes(self.document.visible_layers())
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a default layer
    pub fn add_shadow(&mut self) -> LayerId {
        let id = self.document.push_template(LayerTemplate::default());
        tracing::debug!("Added shadow {}", id);
        self.commit();
        id
    }

    /// Append a copy of `layer` under a fresh id
    pub fn duplicate_shadow(&mut self, layer: &ShadowLayer) -> LayerId {
        let id = self.document.allocate_id();
        self.document.shadows.push(ShadowLayer { id, ..layer.clone() });
        tracing::debug!("Duplicated shadow {} as {}", layer.id, id);
        self.commit();
        id
    }

    /// Remove a layer. Unknown ids change nothing and return `false`.
    pub fn delete_shadow(&mut self, id: LayerId) -> bool {
        if !self.document.remove_layer(id) {
            tracing::debug!("Delete ignored, no shadow {}", id);
            return false;
        }
        self.commit();
        true
    }

    /// Remove every layer
    pub fn clear_shadows(&mut self) {
        self.document.shadows.clear();
        self.commit();
    }

    /// Flip a layer's visibility. Unknown ids change nothing and return `false`.
    pub fn toggle_shadow_visibility(&mut self, id: LayerId) -> bool {
        let Some(layer) = self.document.layer_mut(id) else {
            tracing::debug!("Toggle ignored, no shadow {}", id);
            return false;
        };
        layer.visible = !layer.visible;
        self.commit();
        true
    }

    /// Edit one field without syncing or recording it.
    ///
    /// Meant for continuous input such as slider drags; call
    /// [`ShadowEditor::commit_field_update`] when the interaction ends.
    /// Returns `false` for unknown ids.
    pub fn update_field(&mut self, id: LayerId, update: &FieldUpdate) -> Result<bool> {
        let Some(layer) = self.document.layer_mut(id) else {
            return Ok(false);
        };
        update.apply(layer)?;
        Ok(true)
    }

    /// Sync and record the edits made through [`ShadowEditor::update_field`].
    ///
    /// Records nothing when the document still matches the current snapshot.
    pub fn commit_field_update(&mut self) -> bool {
        if self.history.current() == Some(&self.document) {
            return false;
        }
        self.commit();
        true
    }

    /// Replace the background color and opacity
    pub fn set_background(&mut self, color: &str, opacity: u8) -> Result<()> {
        self.document.background = Background::new(normalize_hex(color)?, opacity.min(100));
        self.commit();
        Ok(())
    }

    /// Replace the background color at full opacity
    pub fn set_background_color(&mut self, color: &str) -> Result<()> {
        self.set_background(color, 100)
    }

    /// Replace all layers, ids taken from the counter
    pub fn load_preset(&mut self, templates: impl IntoIterator<Item = LayerTemplate>) {
        self.document.replace_layers(templates);
        self.commit();
    }

    /// Load a built-in preset by id or title
    pub fn load_named_preset(&mut self, key: &str) -> Result<&'static Preset> {
        let preset = find_preset(key)?;
        self.load_preset(preset.templates());
        tracing::debug!("Loaded preset {}", preset.id);
        Ok(preset)
    }

    // ========================================================================
    // History
    // ========================================================================

    pub fn undo(&mut self) -> HistoryOutcome {
        match self.history.undo() {
            Some(snapshot) => self.install(snapshot),
            None => HistoryOutcome::default(),
        }
    }

    pub fn redo(&mut self) -> HistoryOutcome {
        match self.history.redo() {
            Some(snapshot) => self.install(snapshot),
            None => HistoryOutcome::default(),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Record the current document as the first snapshot
    pub fn save_baseline(&mut self) {
        self.history.save_state(&self.document);
    }

    /// Startup restoration, effective once per editor.
    ///
    /// Installs the persisted snapshot at the history cursor when there is one
    /// and returns `true`; otherwise records the current document as the
    /// baseline.
    pub fn initialize_from_history(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;

        match self.history.current().cloned() {
            Some(snapshot) => {
                tracing::debug!("Restoring document from history");
                self.restore(snapshot);
                true
            }
            None => {
                self.save_baseline();
                false
            }
        }
    }

    // ========================================================================
    // URL
    // ========================================================================

    /// Encode the document into the page query string.
    ///
    /// Clears the query when no layer is visible.
    pub fn sync_to_url(&mut self) {
        match self.codec.encode(&self.document.shadows, &self.document.background) {
            Ok(encoded) => self.location.replace_query(&to_query(&encoded)),
            Err(e) => tracing::warn!("Failed to encode shadows for the URL: {}", e),
        }
    }

    /// Replace the document with the one in the page query string.
    ///
    /// On success the history is reset to a single baseline snapshot and the
    /// number of loaded layers is returned. On failure the document is left
    /// untouched; the error text is meant for the user.
    pub fn load_from_url(&mut self) -> Result<usize> {
        let query = self.location.query();
        let decoded = decode_query(&self.codec, &query).map_err(|e| {
            tracing::warn!("Failed to load shadows from URL: {}", e);
            e
        })?;

        let count = decoded.shadows.len();
        let mut shadows = decoded.shadows;
        for layer in &mut shadows {
            layer.id = self.document.allocate_id();
        }
        self.document.shadows = shadows;
        self.document.background = decoded.background;
        self.initialized = true;

        self.sync_to_url();
        self.history.clear();
        self.save_baseline();

        tracing::debug!("Loaded {} shadows from URL", count);
        Ok(count)
    }

    /// Sync the URL, then snapshot unless a snapshot is being installed
    fn commit(&mut self) {
        self.sync_to_url();
        if !self.applying_history {
            self.history.save_state(&self.document);
        }
    }

    fn install(&mut self, snapshot: ShadowDocument) -> HistoryOutcome {
        let description = describe_change(&self.document, &snapshot);
        self.restore(snapshot);
        tracing::debug!("History step: {}", description);
        HistoryOutcome {
            applied: true,
            description: Some(description),
        }
    }

    fn restore(&mut self, snapshot: ShadowDocument) {
        self.applying_history = true;
        self.document = snapshot;
        self.sync_to_url();
        self.applying_history = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HistoryConfig, MemoryLocation};
    use shadow_store::MemoryStore;

    fn editor() -> (ShadowEditor, MemoryLocation) {
        let location = MemoryLocation::new();
        let history = History::new(Box::new(MemoryStore::new()), HistoryConfig::default());
        let mut editor = ShadowEditor::new(history, Box::new(location.clone()));
        editor.initialize_from_history();
        (editor, location)
    }

    #[test]
    fn test_initialize_saves_baseline_once() {
        let (mut editor, _) = editor();
        assert_eq!(editor.history().len(), 1);
        assert!(!editor.initialize_from_history());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_mutation_syncs_and_records() {
        let (mut editor, location) = editor();
        editor.add_shadow();
        assert_eq!(location.replacements(), 1);
        assert!(location.query().starts_with("s="));
        assert_eq!(editor.undo_count(), 1);
    }

    #[test]
    fn test_undo_does_not_record() {
        let (mut editor, location) = editor();
        editor.add_shadow();
        let outcome = editor.undo();

        assert!(outcome.applied);
        assert_eq!(outcome.description.as_deref(), Some("Removed 1 shadow, 2→1 layers"));
        assert_eq!(editor.history().len(), 2);
        assert_eq!(editor.redo_count(), 1);
        assert_eq!(location.replacements(), 2);
    }

    #[test]
    fn test_undo_without_history() {
        let (mut editor, _) = editor();
        assert_eq!(editor.undo(), HistoryOutcome::default());
        assert_eq!(editor.redo(), HistoryOutcome::default());
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let (mut editor, location) = editor();
        assert!(!editor.delete_shadow(LayerId::new(42)));
        assert!(!editor.toggle_shadow_visibility(LayerId::new(42)));
        assert!(!editor.update_field(LayerId::new(42), &FieldUpdate::Blur(1)).unwrap());
        assert_eq!(location.replacements(), 0);
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_update_field_defers_until_commit() {
        let (mut editor, location) = editor();
        let id = editor.shadows()[0].id;
        for angle in [100, 120, 140] {
            editor
                .update_field(id, &FieldUpdate::Offset { angle, distance: 8 })
                .unwrap();
        }
        assert_eq!(location.replacements(), 0);
        assert_eq!(editor.history().len(), 1);

        assert!(editor.commit_field_update());
        assert_eq!(editor.history().len(), 2);
        assert!(!editor.commit_field_update());
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_invalid_background_color() {
        let (mut editor, _) = editor();
        assert!(editor.set_background("not a color", 50).is_err());
        assert_eq!(editor.background(), &Background::default());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_hidden_layers_clear_the_query() {
        let (mut editor, location) = editor();
        let id = editor.shadows()[0].id;
        editor.toggle_shadow_visibility(id);
        assert_eq!(location.query(), "");
        assert_eq!(editor.css(), "");
    }
}
