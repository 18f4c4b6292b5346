//! Copying the rendered CSS out of the editor

use crate::{ClipboardError, ShadowEditor};

/// Destination for copied text
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that keeps the last copied text
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Copy the CSS declaration. Returns `false` when there is nothing to copy
/// or the clipboard refused the write.
pub fn copy_css(editor: &ShadowEditor, clipboard: &mut dyn Clipboard, vendor_prefixes: bool) -> bool {
    let css = if vendor_prefixes {
        editor.css_with_vendor_prefixes()
    } else {
        editor.css()
    };
    if css.is_empty() {
        return false;
    }

    match clipboard.write_text(&css) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to copy CSS to clipboard: {}", e);
            false
        }
    }
}
