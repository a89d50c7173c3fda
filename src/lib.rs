//! Character select screen for the runner game: catalog, popups, story intro
//! and the on-screen touch pad that feeds the game loop keyboard events.
//!
//! The state machines under [`state`] are plain Rust and run anywhere; the
//! [`components`] and [`platform`] modules need a browser.

pub mod components;
pub mod error;
pub mod model;
pub mod platform;
pub mod state;
pub mod storage;
pub mod util;

pub use error::UiError;
pub use model::{CharacterCatalog, CharacterRecord, GameMode, StorySlide};
pub use storage::{KeyValueStore, MemoryStore, SelectionStore};
