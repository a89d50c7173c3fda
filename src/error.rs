use thiserror::Error;

use crate::state::overlay::{OverlayKind, Ticket, VisibilityState};

/// Everything that can go wrong in the select screen. None of these are fatal
/// to the page; callers log and carry on.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("overlay host `#{host}` is not attached to the document")]
    HostNotReady { host: String },

    #[error("no character with id `{0}`")]
    NotFound(String),

    #[error("cannot confirm unknown character `{0}`")]
    InvalidSelection(String),

    #[error("{capability} unavailable: {reason}")]
    CapabilityUnavailable {
        capability: &'static str,
        reason: String,
    },

    #[error("{kind:?} transition {ticket:?} fired after its instance was replaced (live generation {live})")]
    StaleCallback {
        kind: OverlayKind,
        ticket: Ticket,
        live: u64,
    },

    #[error("{kind:?} cannot {op} while {from:?}")]
    InvalidTransition {
        kind: OverlayKind,
        op: &'static str,
        from: VisibilityState,
    },

    #[error("{kind:?} is mid-transition")]
    TransitionInFlight { kind: OverlayKind },

    #[error("{kind:?} is already on its last slide")]
    TerminalSlide { kind: OverlayKind },

    #[error("{kind:?} does not support {op}")]
    Unsupported { kind: OverlayKind, op: &'static str },

    #[error("storage write failed: {0}")]
    Storage(String),

    #[error("malformed character catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("character catalog is empty")]
    EmptyCatalog,

    #[error("duplicate character id `{0}` in catalog")]
    DuplicateCharacter(String),

    #[error("default character `{0}` is not in the catalog")]
    UnknownDefault(String),
}

impl UiError {
    /// Capability failures are expected on desktop browsers and locked-down
    /// webviews; they are logged and dropped.
    pub fn is_capability(&self) -> bool {
        matches!(self, UiError::CapabilityUnavailable { .. })
    }
}
