//! Client-local key/value persistence for layouts and selections.
//!
//! DESIGN
//! ======
//! Values are JSON strings under fixed keys, mirroring browser storage.
//! `MemoryStore` backs session scope and tests; `FileStore` keeps one JSON
//! object on disk and rewrites it on every mutation.
//!
//! ERROR HANDLING
//! ==============
//! Writes surface I/O failures. Reads never fail: a malformed value is
//! logged and treated as absent, and malformed entries inside the layout map
//! are dropped one by one so the rest of the layout survives.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::card::{LayoutSnapshot, StoredCard, StoredLayout};
use crate::error::LayoutError;
use crate::feed::GroupRef;

/// Persisted card layout (`{id: {width, height, x, y}}`).
pub const CARD_SIZES_KEY: &str = "cardSizes";

/// Persisted group selection (collaborator-owned).
pub const SELECTED_GROUPS_KEY: &str = "selectedGroups";

/// Session-scoped visibility of the group selection UI.
pub const SETTINGS_VISIBLE_KEY: &str = "selectSettingVisible";

/// Minimal string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), LayoutError>;

    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), LayoutError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), LayoutError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), LayoutError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store persisted as a single JSON object file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file starts empty; an unreadable
    /// or malformed file is logged and also starts empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "store file malformed; starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "store file unreadable; starting empty");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), keys = entries.len(), "store opened");
        Self { path, entries }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), LayoutError> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), LayoutError> {
        self.entries.insert(key.to_owned(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), LayoutError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Read the persisted layout, keeping every well-formed entry.
///
/// Returns `None` when the key is absent or its value is not a JSON object.
pub fn load_stored_layout(store: &impl KeyValueStore) -> Option<StoredLayout> {
    let raw = store.get(CARD_SIZES_KEY)?;
    let value: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "persisted card layout is not valid JSON; ignoring");
            return None;
        }
    };
    let serde_json::Value::Object(map) = value else {
        warn!("persisted card layout is not an object; ignoring");
        return None;
    };

    let mut layout = StoredLayout::new();
    for (id, entry) in map {
        match serde_json::from_value::<StoredCard>(entry) {
            Ok(card) if has_usable_size(&card) => {
                layout.insert(id, card);
            }
            Ok(_) => warn!(card_id = %id, "persisted card size not positive and finite; dropping entry"),
            Err(e) => warn!(card_id = %id, error = %e, "persisted card entry malformed; dropping entry"),
        }
    }
    Some(layout)
}

fn has_usable_size(card: &StoredCard) -> bool {
    card.width.is_finite() && card.height.is_finite() && card.width > 0.0 && card.height > 0.0
}

/// Persist `snapshot` under [`CARD_SIZES_KEY`].
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn save_snapshot(store: &mut impl KeyValueStore, snapshot: &LayoutSnapshot) -> Result<(), LayoutError> {
    let raw = serde_json::to_string(snapshot)?;
    store.set(CARD_SIZES_KEY, raw)?;
    debug!(cards = snapshot.len(), "card layout persisted");
    Ok(())
}

/// Read the persisted group selection; malformed or missing yields an empty list.
pub fn load_selected_groups(store: &impl KeyValueStore) -> Vec<GroupRef> {
    let Some(raw) = store.get(SELECTED_GROUPS_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(groups) => groups,
        Err(e) => {
            warn!(error = %e, "persisted group selection malformed; ignoring");
            Vec::new()
        }
    }
}

/// Persist the group selection under [`SELECTED_GROUPS_KEY`].
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn save_selected_groups(store: &mut impl KeyValueStore, groups: &[GroupRef]) -> Result<(), LayoutError> {
    let raw = serde_json::to_string(groups)?;
    store.set(SELECTED_GROUPS_KEY, raw)
}
