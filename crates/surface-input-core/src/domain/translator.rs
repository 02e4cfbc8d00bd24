//! Raw-to-normalized event translation.
//!
//! [`Translator`] owns the [`InputState`] and decides, for every raw event,
//! whether to mutate it and which normalized event (if any) results.  It never
//! publishes anything itself: the caller publishes the returned event after the
//! state mutation has completed, which keeps "mutate, then publish" ordering
//! trivially true and lets subscribers read the state re-entrantly.
//!
//! # Policy summary
//!
//! | Raw kind      | State effect                                   | Published        |
//! |---------------|------------------------------------------------|------------------|
//! | `keydown/up`  | ctrl → `ctrl_down`, else alt → `alt_down`, else `key_down[code]` | `keydown/keyup` only in the last case |
//! | `pointerdown` | button flag := true                            | `pointerdown{x,y}` |
//! | `pointerup`   | button flag := false                           | `pointerup{x,y}`   |
//! | `doubleclick` | left, right := false; middle := false if button 2 | `doubleclick{x,y}` |
//! | `pointermove` | none                                           | `pointermove{x,y}` |
//! | `wheel`       | none                                           | `wheel{raw,delta}` |
//!
//! While the gate is closed every raw event is dropped without touching state.

use tracing::trace;

use crate::domain::geometry::{normalize_wheel_delta, surface_coordinates};
use crate::domain::state::{InputState, MouseButton};
use crate::events::raw::{HostElement, RawEvent, RawEventKind, RawKeyEvent, RawPointerEvent};
use crate::events::surface::SurfaceEvent;

/// Tag names treated as text entry when no configuration says otherwise.
pub const DEFAULT_TEXT_ENTRY_TAGS: &[&str] = &["INPUT", "TEXTAREA"];

/// Construction-time translator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// Initial value of the enable gate.
    pub start_enabled: bool,
    /// Keyboard events targeted at elements with these tag names are ignored.
    /// Compared case-insensitively.
    pub text_entry_tags: Vec<String>,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            start_enabled: true,
            text_entry_tags: DEFAULT_TEXT_ENTRY_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Stateful raw event translator.
#[derive(Debug, Clone)]
pub struct Translator {
    state: InputState,
    text_entry_tags: Vec<String>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(TranslatorOptions::default())
    }
}

impl Translator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self {
            state: InputState::new(options.start_enabled),
            text_entry_tags: options.text_entry_tags,
        }
    }

    /// Read access to the tracked state.
    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    /// Opens or closes the gate.
    ///
    /// Returns the `enabled` event to publish when the value actually changed,
    /// `None` for a repeated value.  Tracked state is left as it is.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<SurfaceEvent> {
        if self.state.enabled == enabled {
            return None;
        }
        self.state.enabled = enabled;
        Some(SurfaceEvent::Enabled { value: enabled })
    }

    /// Forgets every held key, modifier and button.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Translates one raw event delivered for `kind`.
    ///
    /// Returns the normalized event to publish, or `None` when the event was
    /// suppressed (gate closed, text entry target, modifier chord) or its shape
    /// does not match `kind`.
    pub fn translate(&mut self, kind: RawEventKind, event: &RawEvent) -> Option<SurfaceEvent> {
        if !self.state.enabled {
            trace!(%kind, "input disabled; raw event dropped");
            return None;
        }

        match (kind, event) {
            (RawEventKind::KeyDown, RawEvent::Key(key)) => self.translate_key(key, true),
            (RawEventKind::KeyUp, RawEvent::Key(key)) => self.translate_key(key, false),
            (RawEventKind::PointerDown, RawEvent::Pointer(pointer)) => {
                self.track_button(pointer, true);
                let (x, y) = surface_coordinates(&pointer.position);
                Some(SurfaceEvent::PointerDown { x, y })
            }
            (RawEventKind::PointerUp, RawEvent::Pointer(pointer)) => {
                self.track_button(pointer, false);
                let (x, y) = surface_coordinates(&pointer.position);
                Some(SurfaceEvent::PointerUp { x, y })
            }
            (RawEventKind::DoubleClick, RawEvent::Pointer(pointer)) => {
                // A double-click ends any drag in progress.
                self.state.buttons.left = false;
                self.state.buttons.right = false;
                if MouseButton::from_host_id(pointer.button) == Some(MouseButton::Middle) {
                    self.state.buttons.middle = false;
                }
                let (x, y) = surface_coordinates(&pointer.position);
                Some(SurfaceEvent::DoubleClick { x, y })
            }
            (RawEventKind::PointerMove, RawEvent::Pointer(pointer)) => {
                let (x, y) = surface_coordinates(&pointer.position);
                Some(SurfaceEvent::PointerMove { x, y })
            }
            (RawEventKind::Wheel, RawEvent::Wheel(wheel)) => Some(SurfaceEvent::Wheel {
                delta: normalize_wheel_delta(wheel),
                raw: wheel.clone(),
            }),
            (kind, _) => {
                trace!(%kind, "raw event shape does not match its kind; ignored");
                None
            }
        }
    }

    fn translate_key(&mut self, key: &RawKeyEvent, down: bool) -> Option<SurfaceEvent> {
        if key
            .target
            .as_ref()
            .is_some_and(|target| self.is_text_entry(target))
        {
            trace!(key_code = key.key_code, "key event targets text entry; ignored");
            return None;
        }

        // Ctrl / Alt chords are reserved for shortcut handling and are not
        // surfaced as plain key events.
        if key.ctrl_key {
            self.state.ctrl_down = down;
            return None;
        }
        if key.alt_key {
            self.state.alt_down = down;
            return None;
        }

        self.state.set_key(key.key_code, down);
        let key_code = key.key_code;
        Some(if down {
            SurfaceEvent::KeyDown { key_code }
        } else {
            SurfaceEvent::KeyUp { key_code }
        })
    }

    fn track_button(&mut self, pointer: &RawPointerEvent, down: bool) {
        if let Some(button) = MouseButton::from_host_id(pointer.button) {
            self.state.set_button(button, down);
        }
    }

    fn is_text_entry(&self, element: &HostElement) -> bool {
        element.content_editable
            || self
                .text_entry_tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(&element.tag_name))
    }
}
