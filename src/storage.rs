use std::collections::HashMap;

use crate::error::UiError;
use crate::model::GameMode;

pub const SELECTED_CHARACTER_KEY: &str = "selectedCharacterId";
pub const GAME_MODE_KEY: &str = "gameMode";

/// Synchronous string key-value store scoped to the page origin.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), UiError>;
    fn remove(&mut self, key: &str) -> Result<(), UiError>;
}

/// `window.localStorage`. Construction fails when storage is disabled
/// (private browsing, sandboxed iframes).
pub struct BrowserStorage {
    store: web_sys::Storage,
}

impl BrowserStorage {
    pub fn open() -> Option<Self> {
        let win = web_sys::window()?;
        match win.local_storage() {
            Ok(Some(store)) => Some(Self { store }),
            _ => None,
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.store.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), UiError> {
        self.store
            .set_item(key, value)
            .map_err(|e| UiError::Storage(format!("{key}: {e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), UiError> {
        self.store
            .remove_item(key)
            .map_err(|e| UiError::Storage(format!("{key}: {e:?}")))
    }
}

#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), UiError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), UiError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Either backend, picked once at start-up.
pub enum AnyStore {
    Browser(BrowserStorage),
    Memory(MemoryStore),
}

impl AnyStore {
    /// Local storage when available, otherwise an in-memory map that lasts
    /// until navigation.
    pub fn detect() -> Self {
        match BrowserStorage::open() {
            Some(s) => AnyStore::Browser(s),
            None => {
                crate::util::cwarn("localStorage unavailable; selection will not persist");
                AnyStore::Memory(MemoryStore::default())
            }
        }
    }
}

impl KeyValueStore for AnyStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            AnyStore::Browser(s) => s.get(key),
            AnyStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), UiError> {
        match self {
            AnyStore::Browser(s) => s.set(key, value),
            AnyStore::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), UiError> {
        match self {
            AnyStore::Browser(s) => s.remove(key),
            AnyStore::Memory(s) => s.remove(key),
        }
    }
}

/// The two flags carried across to the game page. Last write wins.
pub struct SelectionStore<S> {
    inner: S,
}

impl<S: KeyValueStore> SelectionStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn selected_id(&self) -> Option<String> {
        self.inner.get(SELECTED_CHARACTER_KEY).filter(|s| !s.is_empty())
    }

    pub fn game_mode(&self) -> GameMode {
        self.inner
            .get(GAME_MODE_KEY)
            .map(|raw| GameMode::parse(&raw))
            .unwrap_or_default()
    }

    /// Callers validate `id` first; see `CharacterCatalog::confirm_selection`.
    /// Both keys change or neither does: if the mode write fails the previous
    /// id is put back.
    pub(crate) fn save(&mut self, id: &str, mode: GameMode) -> Result<(), UiError> {
        let previous = self.inner.get(SELECTED_CHARACTER_KEY);
        self.inner.set(SELECTED_CHARACTER_KEY, id)?;
        if let Err(e) = self.inner.set(GAME_MODE_KEY, mode.as_str()) {
            let undo = match previous {
                Some(prev) => self.inner.set(SELECTED_CHARACTER_KEY, &prev),
                None => self.inner.remove(SELECTED_CHARACTER_KEY),
            };
            if let Err(undo_err) = undo {
                crate::util::log_err("restore selection", &undo_err);
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_reads_defaults() {
        let store = SelectionStore::new(MemoryStore::default());
        assert_eq!(store.selected_id(), None);
        assert_eq!(store.game_mode(), GameMode::Survival);
    }

    #[test]
    fn unknown_mode_falls_back() {
        let mut mem = MemoryStore::default();
        mem.set(GAME_MODE_KEY, "speedrun").unwrap();
        let store = SelectionStore::new(mem);
        assert_eq!(store.game_mode(), GameMode::Survival);
    }

    #[test]
    fn blank_selection_reads_as_absent() {
        let mut mem = MemoryStore::default();
        mem.set(SELECTED_CHARACTER_KEY, "").unwrap();
        assert_eq!(SelectionStore::new(mem).selected_id(), None);
    }
}
