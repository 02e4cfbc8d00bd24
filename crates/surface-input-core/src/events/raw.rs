//! Raw device events in the host's shape.
//!
//! These are the events a host device event source delivers to registered
//! callbacks: page-relative coordinates, numeric button identifiers, integer
//! key codes, and the identity of the element the event was targeted at.
//! Nothing here is normalized yet; see [`crate::domain::translator`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keymap::KeyCode;

/// The raw event kinds the translator listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawEventKind {
    KeyDown,
    KeyUp,
    PointerDown,
    PointerUp,
    DoubleClick,
    PointerMove,
    Wheel,
}

/// Where a listener for a given raw kind is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerScope {
    /// The host window.  Keyboard focus is not guaranteed to be inside the
    /// surface element, so keyboard listeners live here.
    Window,
    /// The drawing surface element.
    Surface,
}

impl RawEventKind {
    /// All kinds, keyboard first, in registration order.
    pub const ALL: [RawEventKind; 7] = [
        RawEventKind::KeyDown,
        RawEventKind::KeyUp,
        RawEventKind::PointerDown,
        RawEventKind::PointerUp,
        RawEventKind::DoubleClick,
        RawEventKind::PointerMove,
        RawEventKind::Wheel,
    ];

    /// Returns `true` for `keydown` and `keyup`.
    pub fn is_keyboard(self) -> bool {
        matches!(self, RawEventKind::KeyDown | RawEventKind::KeyUp)
    }

    /// Returns the scope a listener for this kind is registered against.
    pub fn scope(self) -> ListenerScope {
        if self.is_keyboard() {
            ListenerScope::Window
        } else {
            ListenerScope::Surface
        }
    }

    /// Returns the host event name (`"keydown"`, `"pointermove"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            RawEventKind::KeyDown => "keydown",
            RawEventKind::KeyUp => "keyup",
            RawEventKind::PointerDown => "pointerdown",
            RawEventKind::PointerUp => "pointerup",
            RawEventKind::DoubleClick => "doubleclick",
            RawEventKind::PointerMove => "pointermove",
            RawEventKind::Wheel => "wheel",
        }
    }
}

impl fmt::Display for RawEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and layout of a host element.
///
/// `offset_parent` is the nearest positioned ancestor; following it from the
/// event target yields the chain whose offsets place the element on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostElement {
    /// Upper- or lower-case tag name as reported by the host (`"CANVAS"`).
    pub tag_name: String,
    /// `true` when the element accepts free-form text editing.
    #[serde(default)]
    pub content_editable: bool,
    /// Horizontal offset from the offset parent, in CSS pixels.
    #[serde(default)]
    pub offset_left: i32,
    /// Vertical offset from the offset parent, in CSS pixels.
    #[serde(default)]
    pub offset_top: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_parent: Option<Box<HostElement>>,
}

impl HostElement {
    /// Creates an element with zero offsets and no offset parent.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            content_editable: false,
            offset_left: 0,
            offset_top: 0,
            offset_parent: None,
        }
    }

    pub fn with_offset(mut self, left: i32, top: i32) -> Self {
        self.offset_left = left;
        self.offset_top = top;
        self
    }

    pub fn with_offset_parent(mut self, parent: HostElement) -> Self {
        self.offset_parent = Some(Box::new(parent));
        self
    }

    pub fn content_editable(mut self) -> Self {
        self.content_editable = true;
        self
    }

    /// Iterates this element followed by each of its offset parents.
    pub fn offset_chain(&self) -> OffsetChain<'_> {
        OffsetChain { next: Some(self) }
    }
}

/// Iterator over an element and its offset parents.  See [`HostElement::offset_chain`].
pub struct OffsetChain<'a> {
    next: Option<&'a HostElement>,
}

impl<'a> Iterator for OffsetChain<'a> {
    type Item = &'a HostElement;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.offset_parent.as_deref();
        Some(current)
    }
}

/// A keyboard event as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawKeyEvent {
    pub key_code: KeyCode,
    #[serde(default)]
    pub ctrl_key: bool,
    #[serde(default)]
    pub alt_key: bool,
    #[serde(default)]
    pub shift_key: bool,
    #[serde(default)]
    pub meta_key: bool,
    /// The element that had focus when the key event fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<HostElement>,
}

impl RawKeyEvent {
    /// A key event with no modifiers and no target element.
    pub fn plain(key_code: KeyCode) -> Self {
        Self {
            key_code,
            ctrl_key: false,
            alt_key: false,
            shift_key: false,
            meta_key: false,
            target: None,
        }
    }
}

/// Where a pointer event happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "coords", rename_all = "snake_case")]
pub enum PointerPosition {
    /// Page-relative coordinates plus the element the event was targeted at.
    Page {
        page_x: i32,
        page_y: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<HostElement>,
    },
    /// Legacy hosts that expose no event object: only the global event's
    /// `x`/`y` are available, and no offset correction is possible.
    Global { x: i32, y: i32 },
}

/// A pointer button / move / double-click event as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPointerEvent {
    /// Host button identifier: 1 = left, 2 = middle, 3 = right.
    /// Move events usually report 0.
    #[serde(default)]
    pub button: u16,
    pub position: PointerPosition,
}

impl RawPointerEvent {
    /// A pointer event at page coordinates over `target`.
    pub fn at_page(button: u16, page_x: i32, page_y: i32, target: Option<HostElement>) -> Self {
        Self {
            button,
            position: PointerPosition::Page {
                page_x,
                page_y,
                target,
            },
        }
    }
}

/// A wheel event as delivered by the host.
///
/// Hosts disagree on how they report wheel motion, so every known field is
/// optional; [`crate::domain::geometry::normalize_wheel_delta`] picks the
/// first one present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWheelEvent {
    /// Standard wheel field.  Positive scrolls toward the user.
    #[serde(default)]
    pub delta_y: f64,
    /// Legacy field, multiples of 120 per notch.  Positive scrolls away.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel_delta: Option<f64>,
    /// Legacy line-count field.  Positive scrolls toward the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PointerPosition>,
}

/// Any raw event delivered to a registered callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawEvent {
    Key(RawKeyEvent),
    Pointer(RawPointerEvent),
    Wheel(RawWheelEvent),
}

impl From<RawKeyEvent> for RawEvent {
    fn from(event: RawKeyEvent) -> Self {
        RawEvent::Key(event)
    }
}

impl From<RawPointerEvent> for RawEvent {
    fn from(event: RawPointerEvent) -> Self {
        RawEvent::Pointer(event)
    }
}

impl From<RawWheelEvent> for RawEvent {
    fn from(event: RawWheelEvent) -> Self {
        RawEvent::Wheel(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_kinds_are_window_scoped() {
        assert_eq!(RawEventKind::KeyDown.scope(), ListenerScope::Window);
        assert_eq!(RawEventKind::KeyUp.scope(), ListenerScope::Window);
    }

    #[test]
    fn test_pointer_kinds_are_surface_scoped() {
        for kind in [
            RawEventKind::PointerDown,
            RawEventKind::PointerUp,
            RawEventKind::DoubleClick,
            RawEventKind::PointerMove,
            RawEventKind::Wheel,
        ] {
            assert_eq!(kind.scope(), ListenerScope::Surface, "{kind} must be surface scoped");
        }
    }

    #[test]
    fn test_offset_chain_walks_every_positioned_ancestor() {
        // Arrange
        let body = HostElement::new("BODY");
        let panel = HostElement::new("DIV").with_offset(30, 5).with_offset_parent(body);
        let canvas = HostElement::new("CANVAS").with_offset(20, 15).with_offset_parent(panel);

        // Act
        let tags: Vec<&str> = canvas.offset_chain().map(|e| e.tag_name.as_str()).collect();

        // Assert
        assert_eq!(tags, vec!["CANVAS", "DIV", "BODY"]);
    }

    #[test]
    fn test_raw_event_deserializes_from_host_json() {
        // Arrange
        let json = r#"{
            "type": "pointer",
            "button": 1,
            "position": {
                "coords": "page",
                "page_x": 120,
                "page_y": 80,
                "target": { "tag_name": "CANVAS", "offset_left": 50, "offset_top": 20 }
            }
        }"#;

        // Act
        let event: RawEvent = serde_json::from_str(json).expect("valid raw pointer JSON");

        // Assert
        let RawEvent::Pointer(pointer) = event else {
            panic!("expected a pointer event, got {event:?}");
        };
        assert_eq!(pointer.button, 1);
        assert!(matches!(
            pointer.position,
            PointerPosition::Page { page_x: 120, page_y: 80, target: Some(_) }
        ));
    }

    #[test]
    fn test_key_event_modifiers_default_to_false() {
        let event: RawEvent =
            serde_json::from_str(r#"{"type":"key","key_code":65}"#).expect("valid key JSON");
        assert_eq!(event, RawEvent::Key(RawKeyEvent::plain(65)));
    }

    #[test]
    fn test_kind_names_match_host_event_names() {
        assert_eq!(RawEventKind::DoubleClick.as_str(), "doubleclick");
        let parsed: RawEventKind = serde_json::from_str("\"pointermove\"").unwrap();
        assert_eq!(parsed, RawEventKind::PointerMove);
    }
}
