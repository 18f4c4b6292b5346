//! Page URL kept in the state directory

use shadow_editor::UrlLocation;
use shadow_store::KeyValueStore;

/// Storage key holding the current query string
pub const LOCATION_KEY: &str = "location";

/// Query string persisted through a [`KeyValueStore`]
pub struct StoredLocation<S> {
    store: S,
}

impl<S: KeyValueStore> StoredLocation<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> UrlLocation for StoredLocation<S> {
    fn query(&self) -> String {
        match self.store.get(LOCATION_KEY) {
            Ok(query) => query.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read the stored URL: {}", e);
                String::new()
            }
        }
    }

    fn replace_query(&mut self, query: &str) {
        let query = query.trim_start_matches('?');
        let result = if query.is_empty() {
            self.store.remove(LOCATION_KEY)
        } else {
            self.store.set(LOCATION_KEY, query)
        };
        if let Err(e) = result {
            tracing::warn!("Failed to store the URL: {}", e);
        }
    }
}
