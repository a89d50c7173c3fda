//! Character catalog and the small amount of state that survives a page load.
//! The catalog is parsed from `assets/catalog.json` once and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::UiError;
use crate::storage::{KeyValueStore, SelectionStore};

const EMBEDDED_CATALOG: &str = include_str!("../assets/catalog.json");

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub skill: String,
    /// Locked characters show the "coming soon" bubble instead of selecting.
    pub locked: bool,
    /// Portrait first, then any extra art.
    #[serde(default)]
    pub images: Vec<String>,
}

impl CharacterRecord {
    pub fn portrait(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySlide {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Value handed to the game page under `gameMode`. The game page only
/// understands `survival`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Survival,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Survival => "survival",
        }
    }

    /// Unrecognized values fall back to the default mode.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "survival" => GameMode::Survival,
            _ => GameMode::default(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Survival => "Survival",
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    default_character: String,
    characters: Vec<CharacterRecord>,
    #[serde(default)]
    story: Vec<StorySlide>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CharacterCatalog {
    default_id: String,
    characters: Vec<CharacterRecord>,
    story: Vec<StorySlide>,
}

impl CharacterCatalog {
    /// Builds a catalog, checking ids are unique and the fallback id exists.
    pub fn new(
        default_id: impl Into<String>,
        characters: Vec<CharacterRecord>,
        story: Vec<StorySlide>,
    ) -> Result<Self, UiError> {
        let default_id = default_id.into();
        if characters.is_empty() {
            return Err(UiError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for c in &characters {
            if !seen.insert(c.id.as_str()) {
                return Err(UiError::DuplicateCharacter(c.id.clone()));
            }
        }
        if !seen.contains(default_id.as_str()) {
            return Err(UiError::UnknownDefault(default_id));
        }
        Ok(Self {
            default_id,
            characters,
            story,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, UiError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::new(file.default_character, file.characters, file.story)
    }

    /// The catalog shipped with the build.
    pub fn embedded() -> Result<Self, UiError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn get(&self, id: &str) -> Result<&CharacterRecord, UiError> {
        self.characters
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| UiError::NotFound(id.to_string()))
    }

    pub fn select_default(&self) -> &CharacterRecord {
        self.characters
            .iter()
            .find(|c| c.id == self.default_id)
            .unwrap_or(&self.characters[0])
    }

    /// Unknown ids are rejected rather than reported as unlocked.
    pub fn is_locked(&self, id: &str) -> Result<bool, UiError> {
        self.get(id).map(|c| c.locked)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.characters.iter()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn story(&self) -> &[StorySlide] {
        &self.story
    }

    /// Persists `id` (and the chosen mode) only if the catalog knows it.
    /// An unknown id leaves whatever was stored before untouched.
    pub fn confirm_selection<S: KeyValueStore>(
        &self,
        id: &str,
        mode: GameMode,
        store: &mut SelectionStore<S>,
    ) -> Result<&CharacterRecord, UiError> {
        let record = self
            .get(id)
            .map_err(|_| UiError::InvalidSelection(id.to_string()))?;
        store.save(&record.id, mode)?;
        Ok(record)
    }

    /// Reads the persisted choice, falling back to the default record when the
    /// key is missing or names a character this build doesn't have.
    pub fn load_selection<S: KeyValueStore>(&self, store: &SelectionStore<S>) -> &CharacterRecord {
        store
            .selected_id()
            .and_then(|id| self.get(&id).ok())
            .unwrap_or_else(|| self.select_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn record(id: &str, locked: bool) -> CharacterRecord {
        CharacterRecord {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            skill: String::new(),
            locked,
            images: vec![],
        }
    }

    fn catalog() -> CharacterCatalog {
        CharacterCatalog::new(
            "ganyu",
            vec![record("ganyu", false), record("raiden", true)],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn embedded_catalog_parses() {
        let c = CharacterCatalog::embedded().unwrap();
        assert_eq!(c.select_default().id, "ganyu");
        assert_eq!(c.story().len(), 2);
    }

    #[test]
    fn lock_status_rejects_unknown_ids() {
        let c = catalog();
        assert!(c.is_locked("raiden").unwrap());
        assert!(!c.is_locked("ganyu").unwrap());
        assert!(matches!(c.is_locked("unknown"), Err(UiError::NotFound(_))));
    }

    #[test]
    fn rejects_bad_catalogs() {
        assert!(matches!(
            CharacterCatalog::new("x", vec![], vec![]),
            Err(UiError::EmptyCatalog)
        ));
        assert!(matches!(
            CharacterCatalog::new("a", vec![record("a", false), record("a", true)], vec![]),
            Err(UiError::DuplicateCharacter(_))
        ));
        assert!(matches!(
            CharacterCatalog::new("zz", vec![record("a", false)], vec![]),
            Err(UiError::UnknownDefault(_))
        ));
        assert!(matches!(
            CharacterCatalog::from_json("{"),
            Err(UiError::Catalog(_))
        ));
    }

    #[test]
    fn stale_persisted_id_falls_back_to_default() {
        let c = catalog();
        let mut store = SelectionStore::new(MemoryStore::default());
        store.save("nahida", GameMode::Survival).unwrap();
        assert_eq!(c.load_selection(&store).id, "ganyu");
    }

    #[test]
    fn game_mode_parse_falls_back() {
        assert_eq!(GameMode::default().as_str(), "survival");
        assert_eq!(GameMode::parse("survival"), GameMode::Survival);
        assert_eq!(GameMode::parse("endless"), GameMode::Survival);
    }
}
