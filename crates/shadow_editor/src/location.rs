//! Page URL seam

use std::sync::{Arc, Mutex};

/// The query string of the page the editor lives in
pub trait UrlLocation {
    /// Current query string without the leading `?`
    fn query(&self) -> String;

    /// Replace the query string in place, without adding a navigation entry.
    /// An empty string clears it.
    fn replace_query(&mut self, query: &str);
}

#[derive(Debug, Default)]
struct LocationState {
    query: String,
    replacements: usize,
}

/// In-memory location. Clones share state so tests can observe what the
/// editor wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    state: Arc<Mutex<LocationState>>,
}

impl MemoryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A location opened with the given query (a leading `?` is dropped)
    pub fn with_query(query: &str) -> Self {
        let location = Self::new();
        if let Ok(mut state) = location.state.lock() {
            state.query = query.trim_start_matches('?').to_string();
        }
        location
    }

    /// How many times the query was replaced
    pub fn replacements(&self) -> usize {
        self.state.lock().map(|state| state.replacements).unwrap_or(0)
    }
}

impl UrlLocation for MemoryLocation {
    fn query(&self) -> String {
        self.state
            .lock()
            .map(|state| state.query.clone())
            .unwrap_or_default()
    }

    fn replace_query(&mut self, query: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.query = query.trim_start_matches('?').to_string();
            state.replacements += 1;
        }
    }
}
