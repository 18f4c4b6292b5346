//! Command handlers

use crate::location::StoredLocation;
use crate::{Command, ViewArg};
use anyhow::{bail, Context};
use shadow_editor::{FieldUpdate, History, HistoryConfig, HistoryOutcome, ShadowEditor, UrlLocation};
use shadow_model::{builtin_presets, LayerId, ShadowDocument, ShadowLayer};
use shadow_store::{CardDimension, FileStore, PreviewSettingsManager, PreviewView, VARIED_VIEW_ITEMS};
use std::fmt::Write;
use std::path::Path;

/// Run one command against the state directory and return what to print
pub fn run(command: Command, state_dir: &Path) -> anyhow::Result<String> {
    let store = FileStore::new(state_dir);

    match command {
        Command::Presets => return Ok(list_presets()),
        Command::Preview { view, items, reset } => return preview(store, view, items, reset),
        _ => {}
    }

    let history = History::load(Box::new(store.clone()), HistoryConfig::default());
    let mut editor = ShadowEditor::new(history, Box::new(StoredLocation::new(store)));

    if let Command::Open { query } = &command {
        let mut location = StoredLocation::new(FileStore::new(state_dir));
        let previous = location.query();
        location.replace_query(query);
        let count = match editor.load_from_url() {
            Ok(count) => count,
            Err(e) => {
                location.replace_query(&previous);
                return Err(anyhow::Error::new(e).context("Failed to load shadows from URL"));
            }
        };
        return Ok(format!(
            "Loaded {} shadow{} from URL\n{}",
            count,
            if count == 1 { "" } else { "s" },
            show(&editor)
        ));
    }
    restore_session(&mut editor);

    let output = match command {
        Command::Show => show(&editor),
        Command::Css { prefixed } => {
            if prefixed {
                editor.css_with_vendor_prefixes()
            } else {
                editor.css()
            }
        }
        Command::Add => {
            let id = editor.add_shadow();
            format!("Added shadow {}", id)
        }
        Command::Duplicate { id } => {
            let layer = existing_layer(&editor, id)?.clone();
            let copy = editor.duplicate_shadow(&layer);
            format!("Duplicated shadow {} as {}", id, copy)
        }
        Command::Delete { id } => {
            if !editor.delete_shadow(LayerId::new(id)) {
                bail!("No shadow with id {}", id);
            }
            format!("Deleted shadow {}", id)
        }
        Command::Toggle { id } => {
            if !editor.toggle_shadow_visibility(LayerId::new(id)) {
                bail!("No shadow with id {}", id);
            }
            let visible = editor.layer(LayerId::new(id)).is_some_and(|layer| layer.visible);
            format!("Shadow {} is now {}", id, if visible { "visible" } else { "hidden" })
        }
        Command::Set {
            id,
            angle,
            distance,
            blur,
            spread,
            color,
            opacity,
        } => {
            let layer = existing_layer(&editor, id)?;
            let mut updates = Vec::new();
            if angle.is_some() || distance.is_some() {
                updates.push(FieldUpdate::Offset {
                    angle: angle.unwrap_or(layer.angle),
                    distance: distance.unwrap_or(layer.distance),
                });
            }
            updates.extend(blur.map(FieldUpdate::Blur));
            updates.extend(spread.map(FieldUpdate::Spread));
            updates.extend(color.map(FieldUpdate::Color));
            updates.extend(opacity.map(FieldUpdate::Opacity));
            if updates.is_empty() {
                bail!("Nothing to change, pass at least one field");
            }

            for update in &updates {
                editor.update_field(LayerId::new(id), update)?;
            }
            if editor.commit_field_update() {
                format!("Updated shadow {}", id)
            } else {
                format!("Shadow {} unchanged", id)
            }
        }
        Command::Background { color, opacity } => {
            editor.set_background(&color, opacity)?;
            let background = editor.background();
            format!("Background {} {}%", background.color, background.opacity)
        }
        Command::Preset { name } => {
            let preset = editor.load_named_preset(&name)?;
            format!("Loaded preset {} ({} layers)", preset.title, preset.layers.len())
        }
        Command::Clear => {
            editor.clear_shadows();
            "Removed all shadows".to_string()
        }
        Command::Undo => describe_outcome(editor.undo(), "Nothing to undo"),
        Command::Redo => describe_outcome(editor.redo(), "Nothing to redo"),
        Command::History { clear } => {
            if clear {
                editor.clear_history();
                "History cleared".to_string()
            } else {
                history_listing(editor.history())
            }
        }
        Command::Presets | Command::Preview { .. } | Command::Open { .. } => String::new(),
    };
    Ok(output)
}

/// Bring back the last document. An empty history log falls back to the
/// stored URL, which still holds the document after `history --clear`.
fn restore_session(editor: &mut ShadowEditor) {
    if editor.history().is_empty() && !editor.location().query().is_empty() {
        if let Ok(count) = editor.load_from_url() {
            tracing::debug!("Restored {} shadows from the stored URL", count);
            return;
        }
    }
    editor.initialize_from_history();
}

fn existing_layer(editor: &ShadowEditor, id: u32) -> anyhow::Result<&ShadowLayer> {
    editor
        .layer(LayerId::new(id))
        .with_context(|| format!("No shadow with id {}", id))
}

fn describe_outcome(outcome: HistoryOutcome, nothing: &str) -> String {
    match outcome.description {
        Some(description) if outcome.applied => description,
        _ => nothing.to_string(),
    }
}

fn layer_line(layer: &ShadowLayer) -> String {
    format!(
        "{:>3} {} angle {}° distance {}px ({}, {}) blur {}px spread {}px {} {}%",
        layer.id,
        if layer.visible { "[x]" } else { "[ ]" },
        layer.angle,
        layer.distance,
        layer.x,
        layer.y,
        layer.blur,
        layer.spread,
        layer.color,
        layer.opacity
    )
}

fn show(editor: &ShadowEditor) -> String {
    let mut out = String::new();
    if editor.shadows().is_empty() {
        out.push_str("No shadows\n");
    }
    for layer in editor.shadows() {
        let _ = writeln!(out, "{}", layer_line(layer));
    }
    let background = editor.background();
    let _ = writeln!(out, "Background {} {}%", background.color, background.opacity);

    let query = editor.location().query();
    if !query.is_empty() {
        let _ = writeln!(out, "URL ?{}", query);
    }
    let _ = write!(
        out,
        "History {} undo, {} redo",
        editor.undo_count(),
        editor.redo_count()
    );
    out
}

fn summary(document: &ShadowDocument) -> String {
    format!(
        "{} layer{} ({} visible), background {} {}%",
        document.shadows.len(),
        if document.shadows.len() == 1 { "" } else { "s" },
        document.visible_count(),
        document.background.color,
        document.background.opacity
    )
}

fn history_listing(history: &History) -> String {
    if history.is_empty() {
        return "History is empty".to_string();
    }
    let mut out = String::new();
    for (index, snapshot) in history.snapshots().iter().enumerate() {
        let marker = if history.cursor() == Some(index) { ">" } else { " " };
        let _ = writeln!(out, "{} {:>2} {}", marker, index, summary(snapshot));
    }
    out.trim_end().to_string()
}

fn list_presets() -> String {
    builtin_presets()
        .iter()
        .map(|preset| {
            format!(
                "{:<18} {:<10} {} ({} layers)",
                preset.id,
                format!("{:?}", preset.category).to_lowercase(),
                preset.title,
                preset.layers.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn preview(store: FileStore, view: Option<ViewArg>, items: Option<u32>, reset: bool) -> anyhow::Result<String> {
    let mut manager = PreviewSettingsManager::new(Box::new(store));
    manager.load();

    if reset {
        manager.reset().context("Failed to reset preview settings")?;
    } else if view.is_some() || items.is_some() {
        let mut settings = manager.get().clone();
        if let Some(view) = view {
            settings.view = match view {
                ViewArg::Grid => PreviewView::Grid,
                ViewArg::Varied => PreviewView::Varied,
            };
        }
        if let Some(items) = items {
            settings.num_items = items;
        }
        manager.update(settings).context("Failed to save preview settings")?;
    }

    let settings = manager.get();
    let cards = &settings.preview_cards;
    let mut out = format!(
        "Page {}\nCards {} radius {} height {} width {}\nView {:?}, {} items",
        settings.page.background_color,
        cards.background_color,
        CardDimension::BorderRadius.format_value(cards.border_radius),
        CardDimension::Height.format_value(cards.height),
        CardDimension::Width.format_value(cards.width),
        settings.view,
        settings.num_items
    );
    if settings.view == PreviewView::Varied {
        for item in VARIED_VIEW_ITEMS {
            let _ = write!(out, "\n  {} card {} x {}", item.kind, item.width, item.height);
        }
    }
    Ok(out)
}
