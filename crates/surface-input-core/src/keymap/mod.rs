//! Key code table.
//!
//! The translator treats key codes as opaque integers; this module only names
//! them.  See [`codes::Key`].

pub mod codes;

pub use codes::{Key, KeyCode, ALL_KEYS};
