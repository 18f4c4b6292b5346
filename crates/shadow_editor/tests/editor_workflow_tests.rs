//! Integration tests for the shadow editor
//!
//! These drive the editor the way the page does: startup restoration, edits,
//! undo/redo, URL loading and reloads against shared storage.

use shadow_editor::{
    handle_key, FieldUpdate, History, HistoryConfig, KeyChord, MemoryLocation, ShadowEditor,
    ShortcutAction, UrlLocation,
};
use shadow_model::{Background, LayerId, LayerTemplate};
use shadow_store::{to_query, MemoryStore, ShadowCodec};

/// Editor plus handles on its storage and URL
struct Session {
    editor: ShadowEditor,
    store: MemoryStore,
    location: MemoryLocation,
}

impl Session {
    fn start() -> Self {
        Self::open(MemoryStore::new(), MemoryLocation::new())
    }

    /// Open an editor over existing storage, as a page reload would
    fn open(store: MemoryStore, location: MemoryLocation) -> Self {
        let history = History::load(Box::new(store.clone()), HistoryConfig::default());
        let mut editor = ShadowEditor::new(history, Box::new(location.clone()));
        editor.initialize_from_history();
        Self {
            editor,
            store,
            location,
        }
    }

    fn reload(self) -> Self {
        Self::open(self.store, self.location)
    }

    fn ids(&self) -> Vec<u32> {
        self.editor.shadows().iter().map(|layer| layer.id.get()).collect()
    }
}

#[test]
fn test_add_undo_redo_scenario() {
    let mut session = Session::start();
    let first = &session.editor.shadows()[0];
    assert_eq!(first.id, LayerId::new(1));
    assert_eq!((first.x, first.y), (8, 0));

    session.editor.add_shadow();
    assert_eq!(session.ids(), vec![1, 2]);
    assert_eq!(session.editor.document().next_id, 3);
    assert_eq!(session.editor.undo_count(), 1);

    assert!(session.editor.undo().applied);
    assert_eq!(session.ids(), vec![1]);
    assert_eq!(session.editor.undo_count(), 0);
    assert_eq!(session.editor.redo_count(), 1);

    let redo = session.editor.redo();
    assert!(redo.applied);
    assert_eq!(redo.description.as_deref(), Some("Added 1 shadow, 1→2 layers"));
    assert_eq!(session.ids(), vec![1, 2]);
}

#[test]
fn test_ids_increase_and_are_not_reused() {
    let mut session = Session::start();
    let a = session.editor.add_shadow();
    let b = session.editor.add_shadow();
    assert!(b > a);
    assert_eq!(session.editor.document().next_id, b.get() + 1);

    session.editor.delete_shadow(b);
    let c = session.editor.add_shadow();
    assert!(c > b);

    let source = session.editor.layer(a).cloned().unwrap();
    let d = session.editor.duplicate_shadow(&source);
    assert!(d > c);
    assert_eq!(session.editor.layer(d).map(|l| l.to_template()), Some(source.to_template()));
}

#[test]
fn test_edit_after_undo_drops_redo() {
    let mut session = Session::start();
    session.editor.add_shadow();
    session.editor.add_shadow();
    session.editor.undo();
    session.editor.set_background("#222222", 100).unwrap();

    assert!(!session.editor.can_redo());
    assert!(!session.editor.redo().applied);
    assert_eq!(session.editor.shadows().len(), 2);
}

#[test]
fn test_background_round_trips_through_url() {
    let mut session = Session::start();
    session.editor.set_background("#112233", 50).unwrap();

    let mut other = Session::open(MemoryStore::new(), MemoryLocation::with_query(&session.location.query()));
    let loaded = other.editor.load_from_url().unwrap();
    assert_eq!(loaded, 1);
    assert_eq!(other.editor.background(), &Background::new("#112233", 50));
}

#[test]
fn test_load_from_url_resets_history() {
    let codec = ShadowCodec::new();
    let mut shared = shadow_model::ShadowDocument::empty();
    shared.push_template(LayerTemplate::default());
    shared.push_template(LayerTemplate {
        angle: 180,
        distance: 20,
        ..LayerTemplate::default()
    });
    let query = to_query(&codec.encode(&shared.shadows, &shared.background).unwrap());

    let mut session = Session::start();
    session.editor.add_shadow();
    session.editor.add_shadow();
    session.location.clone().replace_query(&query);

    assert_eq!(session.editor.load_from_url().unwrap(), 2);
    assert_eq!(session.editor.history().len(), 1);
    assert!(!session.editor.can_undo());
    assert_eq!(session.editor.shadows()[1].distance, 20);

    // Loaded layers continue the id sequence of the session
    assert_eq!(session.ids(), vec![4, 5]);
}

#[test]
fn test_load_from_bad_url_keeps_document() {
    let mut session = Session::start();
    session.editor.add_shadow();
    let before = session.editor.document().clone();
    session.location.clone().replace_query("s=%%%not-a-payload");

    let err = session.editor.load_from_url().unwrap_err();
    assert!(!err.to_string().is_empty());
    assert_eq!(session.editor.document(), &before);
    assert_eq!(session.editor.undo_count(), 1);

    session.location.clone().replace_query("");
    let err = session.editor.load_from_url().unwrap_err();
    assert_eq!(err.to_string(), "No shadow data found in URL");
}

#[test]
fn test_legacy_css_link() {
    let mut session = Session::open(
        MemoryStore::new(),
        MemoryLocation::with_query("css=0px%204px%2010px%20rgba(0%2C0%2C0%2C0.5)"),
    );
    assert_eq!(session.editor.load_from_url().unwrap(), 1);

    let layer = &session.editor.shadows()[0];
    assert_eq!((layer.x, layer.y), (0, 4));
    assert_eq!(layer.opacity, 50);
    assert!(session.location.query().starts_with("s="));
}

#[test]
fn test_reload_restores_latest_state() {
    let mut session = Session::start();
    session.editor.add_shadow();
    session.editor.set_background("#abcdef", 80).unwrap();

    let session = session.reload();
    assert_eq!(session.editor.shadows().len(), 2);
    assert_eq!(session.editor.background(), &Background::new("#abcdef", 80));
    assert_eq!(session.editor.history().len(), 3);
    assert_eq!(session.editor.undo_count(), 2);
}

#[test]
fn test_reload_after_undo_keeps_position() {
    let mut session = Session::start();
    session.editor.add_shadow();
    session.editor.undo();

    let mut session = session.reload();
    assert_eq!(session.editor.shadows().len(), 1);
    assert!(session.editor.redo().applied);
    assert_eq!(session.editor.shadows().len(), 2);
}

#[test]
fn test_drag_commits_one_snapshot() {
    let mut session = Session::start();
    let id = session.editor.shadows()[0].id;
    for distance in 9..30 {
        session
            .editor
            .update_field(id, &FieldUpdate::Offset { angle: 90, distance })
            .unwrap();
    }
    session.editor.update_field(id, &FieldUpdate::Blur(12)).unwrap();
    assert!(session.editor.commit_field_update());

    assert_eq!(session.editor.history().len(), 2);
    let outcome = session.editor.undo();
    assert_eq!(outcome.description.as_deref(), Some("Layer 1 blur 12px → 6px"));
    assert_eq!(session.editor.shadows()[0].distance, 8);
}

#[test]
fn test_presets_replace_layers() {
    let mut session = Session::start();
    let preset = session.editor.load_named_preset("tailwind-lg").unwrap();
    assert_eq!(session.editor.shadows().len(), preset.layers.len());
    assert!(session.ids().iter().all(|&id| id >= 2));
    assert!(session.editor.load_named_preset("nope").is_err());
    assert_eq!(session.editor.undo_count(), 1);
}

#[test]
fn test_keyboard_shortcuts() {
    let mut session = Session::start();
    session.editor.add_shadow();

    let (shortcut, outcome) = handle_key(&mut session.editor, &KeyChord::new("z").ctrl()).unwrap();
    assert_eq!(shortcut.action, ShortcutAction::Undo);
    assert!(shortcut.prevent_default);
    assert!(outcome.applied);

    let (shortcut, outcome) = handle_key(&mut session.editor, &KeyChord::new("Z").meta().shift()).unwrap();
    assert_eq!(shortcut.action, ShortcutAction::Redo);
    assert!(outcome.applied);
    assert_eq!(session.editor.shadows().len(), 2);

    assert!(handle_key(&mut session.editor, &KeyChord::new("a").ctrl()).is_none());
}

#[test]
fn test_clear_then_undo() {
    let mut session = Session::start();
    session.editor.add_shadow();
    session.editor.clear_shadows();
    assert!(session.editor.shadows().is_empty());
    assert_eq!(session.location.query(), "");

    let outcome = session.editor.undo();
    assert_eq!(outcome.description.as_deref(), Some("Added 2 shadows, 0→2 layers"));
    assert!(session.location.query().starts_with("s="));

    session.editor.clear_history();
    assert!(!session.editor.can_undo());
    assert!(!session.editor.can_redo());
}
