//! # surface-input-core
//!
//! Event vocabularies, the key code table, and the translation state machines
//! for the surface input layer.
//!
//! This crate has no dependencies on host windowing systems, event buses or
//! I/O.  The `surface-input` crate wires it to a device event source and a
//! publish/subscribe bus.
//!
//! # Architecture overview
//!
//! A host window and its drawing surface emit raw device events: key codes,
//! numeric button identifiers, coordinates relative to the page.  Application
//! code wants something steadier: "key 65 went down", "pointer pressed at
//! (70, 60) on the surface".
//!
//! - **`events`** – Both vocabularies: [`RawEvent`] in, [`SurfaceEvent`] out.
//! - **`domain`** – The [`Translator`] (state tracking, gating, coordinate
//!   normalization) and the [`ClickState`] machine that turns a matching
//!   down/up pair into a `clicked` event.
//! - **`keymap`** – Named constants for the integer key codes hosts report.

pub mod domain;
pub mod events;
pub mod keymap;

pub use domain::click::ClickState;
pub use domain::geometry::{cumulative_offset, normalize_wheel_delta, surface_coordinates};
pub use domain::state::{ButtonState, InputState, MouseButton};
pub use domain::translator::{Translator, TranslatorOptions, DEFAULT_TEXT_ENTRY_TAGS};
pub use events::raw::{
    HostElement, ListenerScope, PointerPosition, RawEvent, RawEventKind, RawKeyEvent,
    RawPointerEvent, RawWheelEvent,
};
pub use events::surface::{EventName, SurfaceEvent, UnknownEventName};
pub use keymap::{Key, KeyCode};
