//! Single-threaded in-process event bus.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use surface_input_core::{EventName, SurfaceEvent};
use tracing::{trace, warn};

use super::{EventBus, EventHandler, SubscriptionId};

struct Subscription {
    id: SubscriptionId,
    name: EventName,
    handler: EventHandler,
}

/// An [`EventBus`] that delivers synchronously on the publishing thread.
///
/// Events published while a delivery is already running are queued and
/// delivered in FIFO order after the current event has reached all of its
/// subscribers.  Every subscriber therefore observes events in publish order,
/// even when a subscriber publishes from inside its handler.
///
/// A subscription removed during a delivery receives nothing further, not even
/// the event currently being delivered to later subscribers.
///
/// If a subscriber panics, events still queued behind the one being delivered
/// are dropped with it.
#[derive(Default)]
pub struct LocalEventBus {
    subscriptions: RefCell<Vec<Subscription>>,
    next_id: Cell<u64>,
    pending: RefCell<VecDeque<SurfaceEvent>>,
    delivering: Cell<bool>,
}

/// Ends a delivery run even if a subscriber panics.
struct DeliveryGuard<'a>(&'a LocalEventBus);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        let dropped = {
            let mut pending = self.0.pending.borrow_mut();
            let dropped = pending.len();
            pending.clear();
            dropped
        };
        if dropped > 0 {
            warn!(dropped, "delivery aborted; discarding queued events");
        }
        self.0.delivering.set(false);
    }
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions across all names.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Number of live subscriptions for `name`.
    pub fn subscriber_count_for(&self, name: EventName) -> usize {
        self.subscriptions
            .borrow()
            .iter()
            .filter(|s| s.name == name)
            .count()
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.borrow().iter().any(|s| s.id == id)
    }

    fn deliver(&self, event: &SurfaceEvent) {
        let name = event.name();
        let targets: Vec<(SubscriptionId, EventHandler)> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.name == name)
            .map(|s| (s.id, EventHandler::clone(&s.handler)))
            .collect();

        trace!(%name, subscribers = targets.len(), "deliver");
        for (id, handler) in targets {
            if self.is_subscribed(id) {
                handler(event);
            }
        }
    }
}

impl EventBus for LocalEventBus {
    fn subscribe(&self, name: EventName, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.get() + 1);
        self.next_id.set(id.id());
        self.subscriptions
            .borrow_mut()
            .push(Subscription { id, name, handler });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        before != subscriptions.len()
    }

    fn publish(&self, event: SurfaceEvent) {
        self.pending.borrow_mut().push_back(event);
        if self.delivering.get() {
            return;
        }

        self.delivering.set(true);
        let _guard = DeliveryGuard(self);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(event) => self.deliver(&event),
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    fn recorder(log: &Rc<RefCell<Vec<SurfaceEvent>>>) -> EventHandler {
        let log = Rc::clone(log);
        Rc::new(move |event: &SurfaceEvent| log.borrow_mut().push(event.clone()))
    }

    #[test]
    fn test_publish_reaches_only_subscribers_of_that_name() {
        // Arrange
        let bus = LocalEventBus::new();
        let downs = Rc::new(RefCell::new(Vec::new()));
        let ups = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(EventName::KeyDown, recorder(&downs));
        bus.subscribe(EventName::KeyUp, recorder(&ups));

        // Act
        bus.publish(SurfaceEvent::KeyDown { key_code: 65 });

        // Assert
        assert_eq!(*downs.borrow(), vec![SurfaceEvent::KeyDown { key_code: 65 }]);
        assert!(ups.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = LocalEventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = bus.subscribe(EventName::Enabled, recorder(&log));

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(SurfaceEvent::Enabled { value: false });

        assert!(log.borrow().is_empty());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_nested_publish_is_delivered_after_current_event() {
        // Arrange – the first subscriber republishes; the second records order.
        let bus = Rc::new(LocalEventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let inner = Rc::clone(&bus);
            bus.subscribe(
                EventName::PointerUp,
                Rc::new(move |event: &SurfaceEvent| {
                    if let Some((x, y)) = event.coordinates() {
                        inner.publish(SurfaceEvent::Clicked { x, y });
                    }
                }),
            );
        }
        bus.subscribe(EventName::PointerUp, recorder(&log));
        bus.subscribe(EventName::Clicked, recorder(&log));

        // Act
        bus.publish(SurfaceEvent::PointerUp { x: 3, y: 4 });

        // Assert
        assert_eq!(
            *log.borrow(),
            vec![
                SurfaceEvent::PointerUp { x: 3, y: 4 },
                SurfaceEvent::Clicked { x: 3, y: 4 },
            ]
        );
    }

    #[test]
    fn test_subscription_removed_mid_delivery_is_skipped() {
        // Arrange
        let bus = Rc::new(LocalEventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let victim: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
        {
            let inner = Rc::clone(&bus);
            let victim = Rc::clone(&victim);
            bus.subscribe(
                EventName::Wheel,
                Rc::new(move |_: &SurfaceEvent| {
                    if let Some(id) = victim.get() {
                        inner.unsubscribe(id);
                    }
                }),
            );
        }
        victim.set(Some(bus.subscribe(EventName::Wheel, recorder(&log))));

        // Act
        let wheel = SurfaceEvent::Wheel {
            raw: surface_input_core::RawWheelEvent {
                delta_y: 0.0,
                wheel_delta: None,
                detail: None,
                position: None,
            },
            delta: 0.0,
        };
        bus.publish(wheel);

        // Assert
        assert!(log.borrow().is_empty());
        assert_eq!(bus.subscriber_count_for(EventName::Wheel), 1);
    }

    #[test]
    fn test_panicking_subscriber_does_not_leak_queued_events() {
        // Arrange – a keydown subscriber queues a keyup and then panics.
        let bus = Rc::new(LocalEventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let faulty = {
            let inner = Rc::clone(&bus);
            bus.subscribe(
                EventName::KeyDown,
                Rc::new(move |_: &SurfaceEvent| {
                    inner.publish(SurfaceEvent::KeyUp { key_code: 65 });
                    panic!("subscriber failure");
                }),
            )
        };
        bus.subscribe(EventName::KeyUp, recorder(&log));
        bus.subscribe(EventName::Enabled, recorder(&log));

        // Act
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            bus.publish(SurfaceEvent::KeyDown { key_code: 65 });
        }));
        bus.unsubscribe(faulty);
        bus.publish(SurfaceEvent::Enabled { value: false });

        // Assert
        assert!(outcome.is_err());
        assert_eq!(*log.borrow(), vec![SurfaceEvent::Enabled { value: false }]);
    }

    #[test]
    fn test_subscription_ids_are_unique() {
        let bus = LocalEventBus::new();
        let a = bus.subscribe(EventName::KeyDown, Rc::new(|_: &SurfaceEvent| {}));
        let b = bus.subscribe(EventName::KeyDown, Rc::new(|_: &SurfaceEvent| {}));
        assert_ne!(a, b);
    }
}
