//! Shadow Editor - Undoable document store and history
//!
//! This crate owns the live shadow document. Every structural mutation is
//! mirrored into the page URL through the codec and recorded as a snapshot
//! in the bounded history log, which persists to local storage.

mod error;
mod field_update;
mod history;
mod location;
mod diff;
mod editor;
mod shortcuts;
mod export;

pub use error::*;
pub use field_update::*;
pub use history::*;
pub use location::*;
pub use diff::*;
pub use editor::*;
pub use shortcuts::*;
pub use export::*;
