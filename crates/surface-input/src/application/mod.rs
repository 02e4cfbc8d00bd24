//! Application layer for the surface input component.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure translation rules in `surface_input_core`) and the infrastructure
//! (event sources, the event bus, configuration files).
//!
//! Code in this layer:
//!
//! - **Orchestrates** domain objects: it owns the `Translator`, decides where
//!   each raw listener is registered and where each normalized event goes.
//! - **Depends on abstractions**: it only sees the `DeviceEventSource` and
//!   `EventBus` traits, so a host window, an in-process source or a test mock
//!   can be plugged in without changing this code.
//! - **Contains no file system access and no I/O**.
//!
//! # Sub-modules
//!
//! - **`surface_input`** – The component itself: listener lifecycle, gating,
//!   state accessors and teardown.  Runs on every key and pointer event.
//!
//! - **`click_synthesis`** – Per-component state that turns a matching
//!   `pointerdown` / `pointerup` pair into `clicked`.

pub mod click_synthesis;
pub mod surface_input;
