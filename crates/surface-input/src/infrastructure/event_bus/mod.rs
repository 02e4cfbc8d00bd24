//! Publish/subscribe delivery of normalized surface events.
//!
//! The translation component never calls application code directly.  It
//! publishes every normalized event on an [`EventBus`] under the event's name
//! (`"keydown"`, `"clicked"`, `"enabled"`, ...) and any number of subscribers
//! receive it.
//!
//! # Re-entrancy
//!
//! Subscribers are allowed to call back into the component that published the
//! event: toggling input off from a `keydown` handler is the usual example.
//! Implementations must therefore tolerate `publish` (and `subscribe` /
//! `unsubscribe`) being called from inside a delivery.
//! [`local::LocalEventBus`] queues nested publishes and delivers them once the
//! current event has reached every subscriber.

use std::rc::Rc;

use surface_input_core::{EventName, SurfaceEvent};

pub mod local;

/// Callback invoked for every published event of the subscribed name.
pub type EventHandler = Rc<dyn Fn(&SurfaceEvent)>;

/// Opaque token identifying one subscription on one bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wraps a bus-assigned identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The bus-assigned identifier.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Trait abstracting the publish/subscribe facility normalized events go out on.
pub trait EventBus {
    /// Subscribes `handler` to events published under `name`.
    fn subscribe(&self, name: EventName, handler: EventHandler) -> SubscriptionId;

    /// Removes a subscription.  Returns `false` if `id` was unknown.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Delivers `event` to every subscriber of `event.name()`.
    fn publish(&self, event: SurfaceEvent);
}
