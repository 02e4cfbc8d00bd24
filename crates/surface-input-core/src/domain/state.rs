//! Tracked input state: modifiers, pointer buttons, held keys, and the
//! global enable gate.
//!
//! The state only reflects the events it has been shown.  A key released while
//! the surface lacks focus leaves a stale "down" entry until the next matching
//! event or an explicit [`InputState::reset`].

use std::collections::HashMap;

use crate::keymap::KeyCode;

/// Pointer buttons the tracker knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Maps a host button identifier (1 = left, 2 = middle, 3 = right).
    ///
    /// Any other identifier yields `None` and is ignored for state purposes.
    pub fn from_host_id(id: u16) -> Option<Self> {
        match id {
            1 => Some(MouseButton::Left),
            2 => Some(MouseButton::Middle),
            3 => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// Per-button down flags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    pub fn is_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }

    pub fn set(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Middle => self.middle = down,
            MouseButton::Right => self.right = down,
        }
    }
}

/// The single state record owned by the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputState {
    pub ctrl_down: bool,
    pub alt_down: bool,
    pub buttons: ButtonState,
    /// Sparse key set.  Codes with no entry are implicitly up.
    key_down: HashMap<KeyCode, bool>,
    pub enabled: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InputState {
    /// Creates a state with nothing held and the gate set to `enabled`.
    pub fn new(enabled: bool) -> Self {
        Self {
            ctrl_down: false,
            alt_down: false,
            buttons: ButtonState::default(),
            key_down: HashMap::new(),
            enabled,
        }
    }

    /// Returns `true` if the last event seen for `code` was a key-down.
    pub fn is_key_down(&self, code: impl Into<KeyCode>) -> bool {
        self.key_down.get(&code.into()).copied().unwrap_or(false)
    }

    pub fn set_key(&mut self, code: KeyCode, down: bool) {
        self.key_down.insert(code, down);
    }

    /// Codes currently recorded as held, in ascending order.
    pub fn keys_down(&self) -> Vec<KeyCode> {
        let mut codes: Vec<KeyCode> = self
            .key_down
            .iter()
            .filter_map(|(&code, &down)| down.then_some(code))
            .collect();
        codes.sort_unstable();
        codes
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons.is_down(button)
    }

    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        self.buttons.set(button, down);
    }

    /// Clears every key, modifier and button flag.  The enable gate is kept.
    pub fn reset(&mut self) {
        self.ctrl_down = false;
        self.alt_down = false;
        self.buttons = ButtonState::default();
        self.key_down.clear();
    }
}
