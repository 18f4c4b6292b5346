//! Bounded undo/redo log over document snapshots

use serde::{Deserialize, Serialize};
use shadow_model::ShadowDocument;
use shadow_store::{load_obfuscated, save_obfuscated, KeyValueStore};

/// History log settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum number of snapshots kept; the oldest is evicted first
    pub limit: usize,
    /// Local storage key the log persists under
    pub storage_key: String,
}

impl HistoryConfig {
    pub const DEFAULT_LIMIT: usize = 50;
    pub const DEFAULT_STORAGE_KEY: &'static str = "shadows-history";

    /// Set the snapshot cap (at least one)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredLogRef<'a> {
    history: &'a [ShadowDocument],
    current_index: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLog {
    #[serde(default)]
    history: Vec<ShadowDocument>,
    #[serde(default)]
    current_index: Option<i64>,
}

/// Linear undo/redo log.
///
/// Snapshots are whole documents. The cursor points at the snapshot matching
/// the live document; there is no branching, so saving after an undo drops
/// the redo tail. Every change is written through to the store, and storage
/// failures are logged without affecting the in-memory log.
pub struct History {
    snapshots: Vec<ShadowDocument>,
    /// Index of the current snapshot, `None` when empty
    cursor: Option<usize>,
    store: Box<dyn KeyValueStore>,
    config: HistoryConfig,
}

impl History {
    /// Create an empty log. Nothing is read from the store.
    pub fn new(store: Box<dyn KeyValueStore>, config: HistoryConfig) -> Self {
        let config = HistoryConfig {
            limit: config.limit.max(1),
            ..config
        };
        Self {
            snapshots: Vec::new(),
            cursor: None,
            store,
            config,
        }
    }

    /// Create a log re-hydrated from the store.
    ///
    /// Accepts the obfuscated form and plain JSON. A missing cursor means the
    /// end of the log; missing or corrupt data yields an empty log.
    pub fn load(store: Box<dyn KeyValueStore>, config: HistoryConfig) -> Self {
        let mut history = Self::new(store, config);
        let Some(stored) = load_obfuscated::<StoredLog>(history.store.as_ref(), &history.config.storage_key)
        else {
            return history;
        };

        let mut snapshots = stored.history;
        if snapshots.len() > history.config.limit {
            let excess = snapshots.len() - history.config.limit;
            snapshots.drain(..excess);
        }
        let last = snapshots.len().checked_sub(1);
        history.cursor = match (last, stored.current_index) {
            (None, _) => None,
            (Some(last), Some(index)) if index >= 0 => Some((index as usize).min(last)),
            (Some(last), _) => Some(last),
        };
        history.snapshots = snapshots;

        tracing::debug!(
            "Loaded {} history snapshots, cursor {:?}",
            history.snapshots.len(),
            history.cursor
        );
        history
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Record a snapshot of the document, dropping any redo tail
    pub fn save_state(&mut self, document: &ShadowDocument) {
        if let Some(cursor) = self.cursor {
            self.snapshots.truncate(cursor + 1);
        }
        self.snapshots.push(document.clone());

        while self.snapshots.len() > self.config.limit {
            self.snapshots.remove(0);
        }
        self.cursor = self.snapshots.len().checked_sub(1);

        tracing::debug!("Saved history snapshot {}/{}", self.snapshots.len(), self.config.limit);
        self.persist();
    }

    /// Step back, returning a copy of the snapshot now current
    pub fn undo(&mut self) -> Option<ShadowDocument> {
        let cursor = self.cursor.filter(|&cursor| cursor > 0)? - 1;
        self.cursor = Some(cursor);
        self.persist();
        self.snapshots.get(cursor).cloned()
    }

    /// Step forward, returning a copy of the snapshot now current
    pub fn redo(&mut self) -> Option<ShadowDocument> {
        let cursor = self.cursor.filter(|&cursor| cursor + 1 < self.snapshots.len())? + 1;
        self.cursor = Some(cursor);
        self.persist();
        self.snapshots.get(cursor).cloned()
    }

    /// Empty the log
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
        self.persist();
    }

    pub fn can_undo(&self) -> bool {
        self.undo_count() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.redo_count() > 0
    }

    /// Number of steps undo can take
    pub fn undo_count(&self) -> usize {
        self.cursor.unwrap_or(0)
    }

    /// Number of steps redo can take
    pub fn redo_count(&self) -> usize {
        match self.cursor {
            Some(cursor) => self.snapshots.len().saturating_sub(cursor + 1),
            None => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The snapshot at the cursor
    pub fn current(&self) -> Option<&ShadowDocument> {
        self.snapshots.get(self.cursor?)
    }

    /// The most recent snapshot, regardless of the cursor
    pub fn latest(&self) -> Option<&ShadowDocument> {
        self.snapshots.last()
    }

    pub fn snapshots(&self) -> &[ShadowDocument] {
        &self.snapshots
    }

    fn persist(&self) {
        let log = StoredLogRef {
            history: &self.snapshots,
            current_index: self.cursor.map_or(-1, |cursor| cursor as i64),
        };
        if let Err(e) = save_obfuscated(self.store.as_ref(), &self.config.storage_key, &log) {
            tracing::warn!("Failed to save history to storage: {}", e);
        }
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("len", &self.snapshots.len())
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish()
    }
}
