//! Device event sources: where raw keyboard, pointer and wheel events come from.
//!
//! A host exposes two sources.  The **window** source delivers keyboard events
//! no matter which element has focus; the **surface** source delivers pointer
//! and wheel events that land on the drawing surface itself.  The component in
//! `application::surface_input` registers one listener per raw event kind on
//! the matching source and keeps the returned [`ListenerHandle`] so the exact
//! same registration can be removed later.
//!
//! # Why a handle instead of "remove this closure"? (for beginners)
//!
//! Rust closures have no identity you can compare: two closures with the same
//! body are still different values, and a boxed closure cannot be checked for
//! equality.  Hosts that deregister "by function reference" silently keep a
//! listener alive when a different reference is passed.  Returning an opaque
//! handle from `register` makes deregistration exact.
//!
//! # Testability
//!
//! The [`DeviceEventSource`] trait allows tests to drive the component with
//! [`local::LocalEventSource`] (synchronous, in-process dispatch) or with a
//! `mockall` mock when registration failures need to be simulated.

use std::rc::Rc;

use surface_input_core::{RawEvent, RawEventKind};
use thiserror::Error;

pub mod local;

/// Callback invoked by a source for every raw event of the registered kind.
pub type RawEventHandler = Rc<dyn Fn(&RawEvent)>;

/// Opaque token identifying one listener registration on one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    /// Wraps a source-assigned identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The source-assigned identifier.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Error type for listener registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source never emits events of this kind.
    #[error("source does not emit {0} events")]
    UnsupportedKind(RawEventKind),

    /// The source has been shut down and accepts no new listeners.
    #[error("event source is closed")]
    Closed,
}

/// Trait abstracting a host object that emits raw device events.
///
/// Implementations invoke every registered handler synchronously, on the
/// thread that owns the source, in registration order.
pub trait DeviceEventSource {
    /// Registers `handler` for events of `kind` and returns the handle that
    /// removes exactly this registration.
    fn register(
        &self,
        kind: RawEventKind,
        handler: RawEventHandler,
    ) -> Result<ListenerHandle, SourceError>;

    /// Removes the registration identified by `handle`.
    ///
    /// Returns `false` if the handle was unknown or already removed.
    fn deregister(&self, handle: ListenerHandle) -> bool;
}
