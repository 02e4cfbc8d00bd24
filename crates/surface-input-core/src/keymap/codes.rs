//! Device-reported key codes (the legacy DOM `KeyboardEvent.keyCode` values).
//!
//! Hosts deliver keyboard events with a raw integer code.  The translator never
//! interprets that integer: it stores it in the key-down set and forwards it in
//! the `keydown` / `keyup` payloads unchanged.  This table only gives the codes
//! readable names so that application code can write `Key::Space` instead of
//! `32`.
//!
//! # Why the legacy codes? (for beginners)
//!
//! Browsers report two kinds of key identity:
//!
//! | Field               | Example for the "A" key | Meaning                  |
//! |---------------------|-------------------------|--------------------------|
//! | `KeyboardEvent.code`| `"KeyA"`                | Physical key position    |
//! | `KeyboardEvent.keyCode` | `65`                | Legacy integer code      |
//!
//! The integer codes are what most rendering engines historically keyed their
//! shortcut tables on, and they are cheap to store in a map, so the payloads
//! carry integers.  Letters and digits use their ASCII upper-case values
//! (A = 65, 0 = 48); everything else is a fixed assignment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer key code as reported by the host device event source.
pub type KeyCode = u32;

/// Named device key codes.
///
/// The numeric value of each variant is the code the host reports for that key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Key {
    // Editing / whitespace
    Backspace = 8,
    Tab = 9,
    Enter = 13,

    // Modifiers
    Shift = 16,
    Control = 17,
    Alt = 18,

    // Locks and system keys
    Pause = 19,
    CapsLock = 20,
    Escape = 27,
    Space = 32,

    // Navigation cluster (33–46)
    PageUp = 33,
    PageDown = 34,
    End = 35,
    Home = 36,
    ArrowLeft = 37,
    ArrowUp = 38,
    ArrowRight = 39,
    ArrowDown = 40,
    Insert = 45,
    Delete = 46,

    // Digits (ASCII 48–57)
    Digit0 = 48,
    Digit1 = 49,
    Digit2 = 50,
    Digit3 = 51,
    Digit4 = 52,
    Digit5 = 53,
    Digit6 = 54,
    Digit7 = 55,
    Digit8 = 56,
    Digit9 = 57,

    // Letters (ASCII 65–90)
    KeyA = 65,
    KeyB = 66,
    KeyC = 67,
    KeyD = 68,
    KeyE = 69,
    KeyF = 70,
    KeyG = 71,
    KeyH = 72,
    KeyI = 73,
    KeyJ = 74,
    KeyK = 75,
    KeyL = 76,
    KeyM = 77,
    KeyN = 78,
    KeyO = 79,
    KeyP = 80,
    KeyQ = 81,
    KeyR = 82,
    KeyS = 83,
    KeyT = 84,
    KeyU = 85,
    KeyV = 86,
    KeyW = 87,
    KeyX = 88,
    KeyY = 89,
    KeyZ = 90,

    // Meta / context menu
    MetaLeft = 91,
    MetaRight = 92,
    ContextMenu = 93,

    // Numpad (96–111)
    Numpad0 = 96,
    Numpad1 = 97,
    Numpad2 = 98,
    Numpad3 = 99,
    Numpad4 = 100,
    Numpad5 = 101,
    Numpad6 = 102,
    Numpad7 = 103,
    Numpad8 = 104,
    Numpad9 = 105,
    NumpadMultiply = 106,
    NumpadAdd = 107,
    NumpadSubtract = 109,
    NumpadDecimal = 110,
    NumpadDivide = 111,

    // Function keys (112–123)
    F1 = 112,
    F2 = 113,
    F3 = 114,
    F4 = 115,
    F5 = 116,
    F6 = 117,
    F7 = 118,
    F8 = 119,
    F9 = 120,
    F10 = 121,
    F11 = 122,
    F12 = 123,

    NumLock = 144,
    ScrollLock = 145,

    // Punctuation (US layout positions)
    Semicolon = 186,
    Equal = 187,
    Comma = 188,
    Minus = 189,
    Period = 190,
    Slash = 191,
    Backquote = 192,
    BracketLeft = 219,
    Backslash = 220,
    BracketRight = 221,
    Quote = 222,
}

/// Every named key, in ascending code order.
pub const ALL_KEYS: &[Key] = &[
    Key::Backspace,
    Key::Tab,
    Key::Enter,
    Key::Shift,
    Key::Control,
    Key::Alt,
    Key::Pause,
    Key::CapsLock,
    Key::Escape,
    Key::Space,
    Key::PageUp,
    Key::PageDown,
    Key::End,
    Key::Home,
    Key::ArrowLeft,
    Key::ArrowUp,
    Key::ArrowRight,
    Key::ArrowDown,
    Key::Insert,
    Key::Delete,
    Key::Digit0,
    Key::Digit1,
    Key::Digit2,
    Key::Digit3,
    Key::Digit4,
    Key::Digit5,
    Key::Digit6,
    Key::Digit7,
    Key::Digit8,
    Key::Digit9,
    Key::KeyA,
    Key::KeyB,
    Key::KeyC,
    Key::KeyD,
    Key::KeyE,
    Key::KeyF,
    Key::KeyG,
    Key::KeyH,
    Key::KeyI,
    Key::KeyJ,
    Key::KeyK,
    Key::KeyL,
    Key::KeyM,
    Key::KeyN,
    Key::KeyO,
    Key::KeyP,
    Key::KeyQ,
    Key::KeyR,
    Key::KeyS,
    Key::KeyT,
    Key::KeyU,
    Key::KeyV,
    Key::KeyW,
    Key::KeyX,
    Key::KeyY,
    Key::KeyZ,
    Key::MetaLeft,
    Key::MetaRight,
    Key::ContextMenu,
    Key::Numpad0,
    Key::Numpad1,
    Key::Numpad2,
    Key::Numpad3,
    Key::Numpad4,
    Key::Numpad5,
    Key::Numpad6,
    Key::Numpad7,
    Key::Numpad8,
    Key::Numpad9,
    Key::NumpadMultiply,
    Key::NumpadAdd,
    Key::NumpadSubtract,
    Key::NumpadDecimal,
    Key::NumpadDivide,
    Key::F1,
    Key::F2,
    Key::F3,
    Key::F4,
    Key::F5,
    Key::F6,
    Key::F7,
    Key::F8,
    Key::F9,
    Key::F10,
    Key::F11,
    Key::F12,
    Key::NumLock,
    Key::ScrollLock,
    Key::Semicolon,
    Key::Equal,
    Key::Comma,
    Key::Minus,
    Key::Period,
    Key::Slash,
    Key::Backquote,
    Key::BracketLeft,
    Key::Backslash,
    Key::BracketRight,
    Key::Quote,
];

impl Key {
    /// Returns the device-reported code for this key.
    pub fn code(self) -> KeyCode {
        self as KeyCode
    }

    /// Looks up the named key for a raw device code.
    ///
    /// Returns `None` for codes that have no name in this table; such codes
    /// are still tracked and published by the translator.
    pub fn from_code(code: KeyCode) -> Option<Self> {
        ALL_KEYS
            .binary_search_by_key(&code, |k| k.code())
            .ok()
            .map(|idx| ALL_KEYS[idx])
    }

    /// Returns `true` for the Shift, Control, Alt and Meta keys.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::Shift | Key::Control | Key::Alt | Key::MetaLeft | Key::MetaRight
        )
    }
}

impl From<Key> for KeyCode {
    fn from(key: Key) -> Self {
        key.code()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
