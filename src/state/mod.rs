pub mod input;
pub mod overlay;
pub mod viewport;

pub use input::{ControlId, InputBridge, InputEvent, InputSink, KeyPhase, LogicalKey};
pub use overlay::{OverlayKind, OverlaySequencer, PrimaryAction, VisibilityState};
pub use viewport::{DeviceProfile, ViewportAdapter};
