// Catalog lookups and persisted selection, run natively against an in-memory store.

use chara_select::{
    CharacterCatalog, CharacterRecord, GameMode, KeyValueStore, MemoryStore, SelectionStore,
    UiError,
};

fn record(id: &str, locked: bool) -> CharacterRecord {
    CharacterRecord {
        id: id.to_string(),
        name: id.to_string(),
        description: format!("{id} description"),
        skill: format!("{id} skill"),
        locked,
        images: vec![format!("assets/{id}.png")],
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
fn get_returns_matching_record_or_not_found() {
    let c = catalog();
    for id in ["ganyu", "raiden"] {
        assert_eq!(c.get(id).unwrap().id, id);
    }
    match c.get("klee") {
        Err(UiError::NotFound(id)) => assert_eq!(id, "klee"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn lock_status_scenario() {
    let c = catalog();
    assert!(c.is_locked("raiden").unwrap());
    assert!(!c.is_locked("ganyu").unwrap());
    assert!(c.is_locked("unknown").is_err());
}

#[test]
fn confirm_unknown_id_leaves_store_untouched() {
    let c = catalog();
    let mut store = SelectionStore::new(MemoryStore::default());
    c.confirm_selection("ganyu", GameMode::Survival, &mut store)
        .unwrap();

    let err = c
        .confirm_selection("zhongli", GameMode::Survival, &mut store)
        .unwrap_err();
    assert!(matches!(err, UiError::InvalidSelection(ref id) if id == "zhongli"));
    assert_eq!(store.selected_id().as_deref(), Some("ganyu"));
    assert_eq!(store.game_mode(), GameMode::Survival);
}

#[test]
fn selection_survives_restart() {
    let c = catalog();
    let mut store = SelectionStore::new(MemoryStore::default());
    c.confirm_selection("ganyu", GameMode::Survival, &mut store)
        .unwrap();

    // Next page load: same backing store, fresh catalog and wrapper.
    let backing = store.into_inner();
    assert_eq!(
        backing.get("selectedCharacterId").as_deref(),
        Some("ganyu")
    );
    assert_eq!(backing.get("gameMode").as_deref(), Some("survival"));
    let reloaded = SelectionStore::new(backing);
    let c2 = catalog();
    assert_eq!(c2.load_selection(&reloaded).id, "ganyu");
}

/// Accepts every key except `gameMode`.
#[derive(Default)]
struct ModeRejectingStore(MemoryStore);

impl KeyValueStore for ModeRejectingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), UiError> {
        if key == "gameMode" {
            return Err(UiError::Storage("quota exceeded".into()));
        }
        self.0.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), UiError> {
        self.0.remove(key)
    }
}

#[test]
fn failed_mode_write_restores_previous_id() {
    let c = CharacterCatalog::new(
        "ganyu",
        vec![record("ganyu", false), record("keqing", false)],
        vec![],
    )
    .unwrap();
    let mut backing = ModeRejectingStore::default();
    backing.0.set("selectedCharacterId", "ganyu").unwrap();
    let mut store = SelectionStore::new(backing);

    let err = c
        .confirm_selection("keqing", GameMode::Survival, &mut store)
        .unwrap_err();
    assert!(matches!(err, UiError::Storage(_)));
    assert_eq!(store.selected_id().as_deref(), Some("ganyu"));
}

#[test]
fn failed_first_save_leaves_no_id_behind() {
    let c = catalog();
    let mut store = SelectionStore::new(ModeRejectingStore::default());
    assert!(c
        .confirm_selection("ganyu", GameMode::Survival, &mut store)
        .is_err());
    assert_eq!(store.selected_id(), None);
}

#[test]
fn missing_selection_uses_default() {
    let c = catalog();
    let store = SelectionStore::new(MemoryStore::default());
    assert_eq!(c.load_selection(&store).id, c.select_default().id);
    assert_eq!(c.select_default().id, "ganyu");
}

#[test]
fn embedded_catalog_is_consistent() {
    let c = CharacterCatalog::embedded().unwrap();
    assert!(!c.is_empty());
    assert!(!c.select_default().locked, "fallback character must be playable");
    for r in c.iter() {
        assert!(r.portrait().is_some(), "{} has no portrait", r.id);
    }
}
