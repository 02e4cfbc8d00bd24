//! Event vocabularies on both sides of the translator.
//!
//! - **`raw`** – what the host delivers: page coordinates, button numbers,
//!   key codes, target elements.
//! - **`surface`** – what consumers receive: semantically named events with
//!   surface-relative coordinates.

pub mod raw;
pub mod surface;

pub use raw::{
    HostElement, ListenerScope, PointerPosition, RawEvent, RawEventKind, RawKeyEvent,
    RawPointerEvent, RawWheelEvent,
};
pub use surface::{EventName, SurfaceEvent, UnknownEventName};
