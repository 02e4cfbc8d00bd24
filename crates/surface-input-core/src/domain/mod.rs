//! Domain logic for surface input translation.
//!
//! Pure state machines with no I/O and no knowledge of how raw events arrive
//! or how normalized events are delivered.  Everything here can be exercised
//! by feeding values in and checking values out.
//!
//! - **`state`** – [`state::InputState`]: modifiers, buttons, held keys, gate.
//! - **`geometry`** – page-to-surface coordinate and wheel-delta normalization.
//! - **`translator`** – [`translator::Translator`]: the raw → normalized policy.
//! - **`click`** – [`click::ClickState`]: down/up pairing into `clicked`.

pub mod click;
pub mod geometry;
pub mod state;
pub mod translator;
