//! In-process device event source.
//!
//! [`LocalEventSource`] keeps its listeners in a table and invokes them when
//! [`LocalEventSource::dispatch`] is called.  The probe binary feeds it events
//! decoded from stdin; tests use it to inject synthetic events exactly as a
//! host window or surface element would deliver them.

use std::cell::{Cell, RefCell};

use surface_input_core::{ListenerScope, RawEvent, RawEventKind};
use tracing::trace;

use super::{DeviceEventSource, ListenerHandle, RawEventHandler, SourceError};

struct Registration {
    handle: ListenerHandle,
    kind: RawEventKind,
    handler: RawEventHandler,
}

/// A [`DeviceEventSource`] that dispatches synchronously on the caller's thread.
pub struct LocalEventSource {
    label: &'static str,
    scope: Option<ListenerScope>,
    registrations: RefCell<Vec<Registration>>,
    next_id: Cell<u64>,
    closed: Cell<bool>,
}

impl LocalEventSource {
    /// Creates a source that accepts listeners for every raw kind.
    pub fn new(label: &'static str) -> Self {
        Self::with_scope(label, None)
    }

    /// Creates a source that only emits keyboard events, like a host window.
    pub fn window() -> Self {
        Self::with_scope("window", Some(ListenerScope::Window))
    }

    /// Creates a source that only emits pointer and wheel events, like a
    /// drawing surface element.
    pub fn surface() -> Self {
        Self::with_scope("surface", Some(ListenerScope::Surface))
    }

    fn with_scope(label: &'static str, scope: Option<ListenerScope>) -> Self {
        Self {
            label,
            scope,
            registrations: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            closed: Cell::new(false),
        }
    }

    /// Returns the label given at construction.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns `true` if this source emits events of `kind`.
    pub fn accepts(&self, kind: RawEventKind) -> bool {
        self.scope.map_or(true, |scope| kind.scope() == scope)
    }

    /// Delivers `event` to every listener registered for `kind`.
    ///
    /// Handlers run in registration order.  The listener table is snapshotted
    /// first, so a handler may register or deregister listeners on this source
    /// without affecting the current delivery.  Returns the number of
    /// handlers invoked.
    pub fn dispatch(&self, kind: RawEventKind, event: &RawEvent) -> usize {
        let handlers: Vec<RawEventHandler> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| RawEventHandler::clone(&r.handler))
            .collect();

        trace!(source = self.label, %kind, listeners = handlers.len(), "dispatch");
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    /// Total number of live registrations.
    pub fn listener_count(&self) -> usize {
        self.registrations.borrow().len()
    }

    /// Number of live registrations for `kind`.
    pub fn listener_count_for(&self, kind: RawEventKind) -> usize {
        self.registrations
            .borrow()
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }

    /// Drops every listener and rejects future registrations.
    pub fn close(&self) {
        self.closed.set(true);
        self.registrations.borrow_mut().clear();
    }
}

impl DeviceEventSource for LocalEventSource {
    fn register(
        &self,
        kind: RawEventKind,
        handler: RawEventHandler,
    ) -> Result<ListenerHandle, SourceError> {
        if self.closed.get() {
            return Err(SourceError::Closed);
        }
        if !self.accepts(kind) {
            return Err(SourceError::UnsupportedKind(kind));
        }

        let handle = ListenerHandle::new(self.next_id.get());
        self.next_id.set(handle.id() + 1);
        self.registrations.borrow_mut().push(Registration {
            handle,
            kind,
            handler,
        });
        trace!(source = self.label, %kind, handle = handle.id(), "listener registered");
        Ok(handle)
    }

    fn deregister(&self, handle: ListenerHandle) -> bool {
        let mut registrations = self.registrations.borrow_mut();
        let before = registrations.len();
        registrations.retain(|r| r.handle != handle);
        before != registrations.len()
    }
}
