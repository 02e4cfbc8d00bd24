//! SurfaceInput: binds a [`Translator`] to a window source, a surface source
//! and an event bus.
//!
//! # Data flow
//!
//! ```text
//! window source  ── keydown / keyup ─────────────────┐
//!                                                    ├─► Translator ─► EventBus ─► subscribers
//! surface source ── pointer* / doubleclick / wheel ──┘        │            ▲
//!                                                             └─► ClickSynthesizer ── "clicked"
//! ```
//!
//! The click synthesizer sees only this component's own pointer stream, so
//! two components sharing one bus never complete each other's clicks.
//!
//! # Lifecycle
//!
//! [`SurfaceInput::attach`] registers exactly one listener per raw event kind
//! and keeps every returned [`ListenerHandle`].  [`SurfaceInput::detach`] (or
//! dropping the value) hands the same handles back to the same sources, so
//! teardown removes precisely what attach added.
//!
//! # Borrowing and re-entrancy (for beginners)
//!
//! The translator lives in an `Rc<RefCell<_>>` shared between this struct and
//! the seven listener callbacks.  A callback borrows it mutably only for the
//! duration of `translate`, then releases the borrow *before* publishing.
//! That ordering matters: a subscriber is free to call
//! [`SurfaceInput::set_enabled`] or read state while handling the event, and
//! would panic with "already borrowed" if the callback were still holding the
//! `RefMut`.

use std::cell::RefCell;
use std::rc::Rc;

use surface_input_core::{
    ButtonState, InputState, KeyCode, ListenerScope, MouseButton, RawEvent, RawEventKind,
    Translator, TranslatorOptions,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::click_synthesis::ClickSynthesizer;
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::event_source::{
    DeviceEventSource, ListenerHandle, RawEventHandler, SourceError,
};

/// Error type for [`SurfaceInput::attach`].
#[derive(Debug, Error)]
pub enum AttachError {
    /// A source refused one of the listeners.  Listeners registered before the
    /// failure have already been removed again.
    #[error("failed to register {kind} listener on the {scope:?} source: {source}")]
    Register {
        kind: RawEventKind,
        scope: ListenerScope,
        #[source]
        source: SourceError,
    },
}

/// Construction options for [`SurfaceInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceInputOptions {
    pub translator: TranslatorOptions,
    /// Publish `clicked` after a matching `pointerdown` / `pointerup` pair.
    pub click_synthesis: bool,
}

impl Default for SurfaceInputOptions {
    fn default() -> Self {
        Self {
            translator: TranslatorOptions::default(),
            click_synthesis: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    kind: RawEventKind,
    handle: ListenerHandle,
}

/// The input translation component for one drawing surface.
pub struct SurfaceInput {
    translator: Rc<RefCell<Translator>>,
    bus: Rc<dyn EventBus>,
    window: Rc<dyn DeviceEventSource>,
    surface: Rc<dyn DeviceEventSource>,
    listeners: Vec<Listener>,
    clicks: Option<Rc<ClickSynthesizer>>,
}

impl SurfaceInput {
    /// Registers the seven raw listeners.
    ///
    /// Keyboard listeners go on `window`; pointer, double-click and wheel
    /// listeners go on `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::Register`] when a source rejects a listener.
    /// Nothing stays registered in that case.
    pub fn attach(
        window: Rc<dyn DeviceEventSource>,
        surface: Rc<dyn DeviceEventSource>,
        bus: Rc<dyn EventBus>,
        options: SurfaceInputOptions,
    ) -> Result<Self, AttachError> {
        let mut input = Self {
            translator: Rc::new(RefCell::new(Translator::new(options.translator))),
            bus,
            window,
            surface,
            listeners: Vec::with_capacity(RawEventKind::ALL.len()),
            clicks: options
                .click_synthesis
                .then(|| Rc::new(ClickSynthesizer::new())),
        };

        for kind in RawEventKind::ALL {
            let handler = input.raw_handler(kind);
            match input.source_for(kind).register(kind, handler) {
                Ok(handle) => input.listeners.push(Listener { kind, handle }),
                Err(source) => {
                    warn!(%kind, error = %source, "listener registration failed; rolling back");
                    // Dropping `input` deregisters everything registered so far.
                    return Err(AttachError::Register {
                        kind,
                        scope: kind.scope(),
                        source,
                    });
                }
            }
        }

        info!(
            listeners = input.listeners.len(),
            click_synthesis = options.click_synthesis,
            enabled = input.is_enabled(),
            "surface input attached"
        );
        Ok(input)
    }

    fn source_for(&self, kind: RawEventKind) -> &Rc<dyn DeviceEventSource> {
        match kind.scope() {
            ListenerScope::Window => &self.window,
            ListenerScope::Surface => &self.surface,
        }
    }

    fn raw_handler(&self, kind: RawEventKind) -> RawEventHandler {
        let translator = Rc::clone(&self.translator);
        let bus = Rc::clone(&self.bus);
        let clicks = self.clicks.clone();
        Rc::new(move |event: &RawEvent| {
            // The RefMut is dropped at the end of this statement.
            let normalized = translator.borrow_mut().translate(kind, event);
            let Some(normalized) = normalized else {
                return;
            };
            let clicked = clicks.as_ref().and_then(|clicks| clicks.observe(&normalized));
            bus.publish(normalized);
            if let Some(clicked) = clicked {
                bus.publish(clicked);
            }
        })
    }

    // ── Gate ──────────────────────────────────────────────────────────────────

    /// Opens or closes the gate.
    ///
    /// Publishes `enabled` and returns `true` only when the value changed.
    /// Held keys, modifiers and buttons are left untouched either way.
    pub fn set_enabled(&self, enabled: bool) -> bool {
        let changed = self.translator.borrow_mut().set_enabled(enabled);
        match changed {
            Some(event) => {
                info!(enabled, "surface input gate changed");
                self.bus.publish(event);
                true
            }
            None => false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.translator.borrow().is_enabled()
    }

    /// Forgets held keys, modifiers, buttons and any pending click press.
    ///
    /// Nothing is published.  Useful after the host loses focus, when the
    /// matching key-up or pointer-up events will never arrive.
    pub fn reset(&self) {
        self.translator.borrow_mut().reset();
        if let Some(clicks) = &self.clicks {
            clicks.reset();
        }
        debug!("surface input state reset");
    }

    // ── Read-only state ───────────────────────────────────────────────────────

    pub fn ctrl_down(&self) -> bool {
        self.translator.borrow().state().ctrl_down
    }

    pub fn alt_down(&self) -> bool {
        self.translator.borrow().state().alt_down
    }

    pub fn buttons(&self) -> ButtonState {
        self.translator.borrow().state().buttons
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.translator.borrow().state().is_button_down(button)
    }

    pub fn is_key_down(&self, code: impl Into<KeyCode>) -> bool {
        self.translator.borrow().state().is_key_down(code)
    }

    /// Codes currently held, ascending.
    pub fn keys_down(&self) -> Vec<KeyCode> {
        self.translator.borrow().state().keys_down()
    }

    /// A copy of the whole tracked state.
    pub fn snapshot(&self) -> InputState {
        self.translator.borrow().state().clone()
    }

    /// Number of raw listeners currently registered by this component.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn click_synthesis_enabled(&self) -> bool {
        self.clicks.is_some()
    }

    // ── Teardown ──────────────────────────────────────────────────────────────

    /// Deregisters every raw listener.
    pub fn detach(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        let listeners = std::mem::take(&mut self.listeners);
        let count = listeners.len();
        for Listener { kind, handle } in listeners {
            if !self.source_for(kind).deregister(handle) {
                warn!(%kind, handle = handle.id(), "listener was already gone at teardown");
            }
        }
        if count > 0 {
            info!(listeners = count, "surface input detached");
        }
    }
}

impl Drop for SurfaceInput {
    fn drop(&mut self) {
        self.teardown();
    }
}
