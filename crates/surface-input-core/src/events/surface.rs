//! Normalized, surface-relative events published to consumers.
//!
//! Every payload is an owned copy built at translation time; consumers never
//! receive a reference into the tracked input state.
//!
//! # Serde representation
//!
//! ```json
//! {"type":"keydown","key_code":65}
//! {"type":"pointerdown","x":70,"y":60}
//! {"type":"enabled","value":false}
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::raw::RawWheelEvent;
use crate::keymap::KeyCode;

/// The semantic name an event is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventName {
    KeyDown,
    KeyUp,
    PointerDown,
    PointerUp,
    DoubleClick,
    PointerMove,
    Wheel,
    Clicked,
    Enabled,
}

impl EventName {
    /// All published names.
    pub const ALL: [EventName; 9] = [
        EventName::KeyDown,
        EventName::KeyUp,
        EventName::PointerDown,
        EventName::PointerUp,
        EventName::DoubleClick,
        EventName::PointerMove,
        EventName::Wheel,
        EventName::Clicked,
        EventName::Enabled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventName::KeyDown => "keydown",
            EventName::KeyUp => "keyup",
            EventName::PointerDown => "pointerdown",
            EventName::PointerUp => "pointerup",
            EventName::DoubleClick => "doubleclick",
            EventName::PointerMove => "pointermove",
            EventName::Wheel => "wheel",
            EventName::Clicked => "clicked",
            EventName::Enabled => "enabled",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a string that is not a published event name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown event name: {0:?}")]
pub struct UnknownEventName(pub String);

impl FromStr for EventName {
    type Err = UnknownEventName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownEventName(s.to_string()))
    }
}

/// A normalized event together with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SurfaceEvent {
    KeyDown { key_code: KeyCode },
    KeyUp { key_code: KeyCode },
    PointerDown { x: i32, y: i32 },
    PointerUp { x: i32, y: i32 },
    DoubleClick { x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    /// `raw` is the untouched host event; `delta` is the normalized scroll
    /// amount, positive away from the user.
    Wheel { raw: RawWheelEvent, delta: f64 },
    /// Synthesized from a `pointerdown` / `pointerup` pair at identical
    /// coordinates.
    Clicked { x: i32, y: i32 },
    Enabled { value: bool },
}

impl SurfaceEvent {
    /// Returns the name this event is published under.
    pub fn name(&self) -> EventName {
        match self {
            SurfaceEvent::KeyDown { .. } => EventName::KeyDown,
            SurfaceEvent::KeyUp { .. } => EventName::KeyUp,
            SurfaceEvent::PointerDown { .. } => EventName::PointerDown,
            SurfaceEvent::PointerUp { .. } => EventName::PointerUp,
            SurfaceEvent::DoubleClick { .. } => EventName::DoubleClick,
            SurfaceEvent::PointerMove { .. } => EventName::PointerMove,
            SurfaceEvent::Wheel { .. } => EventName::Wheel,
            SurfaceEvent::Clicked { .. } => EventName::Clicked,
            SurfaceEvent::Enabled { .. } => EventName::Enabled,
        }
    }

    /// Returns the surface-relative coordinates carried by pointer-shaped events.
    pub fn coordinates(&self) -> Option<(i32, i32)> {
        match *self {
            SurfaceEvent::PointerDown { x, y }
            | SurfaceEvent::PointerUp { x, y }
            | SurfaceEvent::DoubleClick { x, y }
            | SurfaceEvent::PointerMove { x, y }
            | SurfaceEvent::Clicked { x, y } => Some((x, y)),
            _ => None,
        }
    }
}
