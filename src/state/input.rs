// Virtual d-pad / action button state. Turns control presses into logical key
// events with exactly one release per press.

/// Length of the vibration pulse on press.
pub const HAPTIC_PULSE_MS: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlId {
    Up,
    Down,
    Left,
    Right,
    Action,
}

impl ControlId {
    pub const ALL: [ControlId; 5] = [
        ControlId::Up,
        ControlId::Down,
        ControlId::Left,
        ControlId::Right,
        ControlId::Action,
    ];

    pub fn key(self) -> LogicalKey {
        match self {
            ControlId::Up => LogicalKey::MoveUp,
            ControlId::Down => LogicalKey::MoveDown,
            ControlId::Left => LogicalKey::MoveLeft,
            ControlId::Right => LogicalKey::MoveRight,
            ControlId::Action => LogicalKey::Action,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }

    pub fn css_name(self) -> &'static str {
        match self {
            ControlId::Up => "up",
            ControlId::Down => "down",
            ControlId::Left => "left",
            ControlId::Right => "right",
            ControlId::Action => "action",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Action,
}

impl LogicalKey {
    /// `KeyboardEvent.key` the game loop listens for.
    pub fn dom_key(self) -> &'static str {
        match self {
            LogicalKey::MoveUp => "w",
            LogicalKey::MoveDown => "s",
            LogicalKey::MoveLeft => "a",
            LogicalKey::MoveRight => "d",
            LogicalKey::Action => " ",
        }
    }

    /// `KeyboardEvent.code` for the same key.
    pub fn dom_code(self) -> &'static str {
        match self {
            LogicalKey::MoveUp => "KeyW",
            LogicalKey::MoveDown => "KeyS",
            LogicalKey::MoveLeft => "KeyA",
            LogicalKey::MoveRight => "KeyD",
            LogicalKey::Action => "Space",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPhase {
    Pressed,
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub key: LogicalKey,
    pub phase: KeyPhase,
}

/// Where input events go. The browser build forwards them as keyboard events.
pub trait InputSink {
    fn emit(&self, event: InputEvent);
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct InputBridge {
    down: [bool; 5],
    action_ready: bool,
}

impl InputBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, control: ControlId) -> bool {
        self.down[control.slot()]
    }

    pub fn action_ready(&self) -> bool {
        self.action_ready
    }

    /// Cosmetic only; emission is unaffected.
    pub fn set_action_ready(&mut self, ready: bool) {
        self.action_ready = ready;
    }

    /// A second press on a control already held emits nothing.
    pub fn on_press_start(&mut self, control: ControlId) -> Option<InputEvent> {
        let slot = &mut self.down[control.slot()];
        if *slot {
            return None;
        }
        *slot = true;
        Some(InputEvent {
            key: control.key(),
            phase: KeyPhase::Pressed,
        })
    }

    /// Releases with no matching press emit nothing.
    pub fn on_press_end(&mut self, control: ControlId) -> Option<InputEvent> {
        let slot = &mut self.down[control.slot()];
        if !*slot {
            return None;
        }
        *slot = false;
        Some(InputEvent {
            key: control.key(),
            phase: KeyPhase::Released,
        })
    }

    /// Pointer left the control or the browser cancelled the gesture.
    pub fn on_press_cancel(&mut self, control: ControlId) -> Option<InputEvent> {
        self.on_press_end(control)
    }

    /// Releases every held key, e.g. when the page loses focus.
    pub fn release_all(&mut self) -> Vec<InputEvent> {
        ControlId::ALL
            .iter()
            .filter_map(|c| self.on_press_end(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_press_emits_once() {
        let mut b = InputBridge::new();
        assert!(b.on_press_start(ControlId::Left).is_some());
        assert!(b.on_press_start(ControlId::Left).is_none());
        assert!(b.is_pressed(ControlId::Left));
    }

    #[test]
    fn action_ready_does_not_gate_emission() {
        let mut b = InputBridge::new();
        b.set_action_ready(false);
        let ev = b.on_press_start(ControlId::Action).unwrap();
        assert_eq!(ev.key, LogicalKey::Action);
        b.set_action_ready(true);
        assert!(b.action_ready());
    }

    #[test]
    fn release_all_clears_everything() {
        let mut b = InputBridge::new();
        b.on_press_start(ControlId::Up);
        b.on_press_start(ControlId::Action);
        let released = b.release_all();
        assert_eq!(released.len(), 2);
        assert!(released.iter().all(|e| e.phase == KeyPhase::Released));
        assert!(ControlId::ALL.iter().all(|c| !b.is_pressed(*c)));
    }
}
