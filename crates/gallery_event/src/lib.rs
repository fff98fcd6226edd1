//! # gallery_event - Priority Event Bus
//!
//! Explicitly constructed publish/subscribe bus shared between the session,
//! the weapon, the targets and any UI collaborator:
//! - Typed events, dispatched by `TypeId`
//! - Queued publication, synchronous delivery in `process`
//! - Delivery ordered by `(priority, registration order)`, lowest first
//!
//! The bus is `Send + Sync` and every method takes `&self`, so it is normally
//! held in an `Arc` and handed to each component that needs it.

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// Subscriber priority. Lower values are delivered first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub i32);

impl Priority {
    pub const FIRST: Self = Self(-100);
    pub const EARLY: Self = Self(-10);
    pub const NORMAL: Self = Self(0);
    pub const LATE: Self = Self(10);
    pub const LAST: Self = Self(100);
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Trait for events
pub trait Event: Send + Sync + 'static {}

// Blanket implementation
impl<T: Send + Sync + 'static> Event for T {}

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Explicit delivery order key: priority first, then registration sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DeliveryKey {
    pub priority: Priority,
    pub sequence: u64,
}

type DynamicHandler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

struct Subscription {
    id: SubscriberId,
    key: DeliveryKey,
    handler: DynamicHandler,
}

/// Queued event waiting for `process`
struct EventEnvelope {
    type_id: TypeId,
    type_name: &'static str,
    data: Box<dyn Any + Send + Sync>,
}

/// Event bus for publishing and subscribing to events
pub struct EventBus {
    queue: Mutex<VecDeque<EventEnvelope>>,
    handlers: RwLock<BTreeMap<TypeId, Vec<Subscription>>>,
    next_sequence: AtomicU64,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            handlers: RwLock::new(BTreeMap::new()),
            next_sequence: AtomicU64::new(1),
        }
    }

    /// Create a new bus ready to be shared
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Queue an event for delivery on the next `process` call
    pub fn publish<E: Event>(&self, event: E) {
        self.queue.lock().push_back(EventEnvelope {
            type_id: TypeId::of::<E>(),
            type_name: std::any::type_name::<E>(),
            data: Box::new(event),
        });
    }

    /// Subscribe to an event type with normal priority
    pub fn subscribe<E: Event, F>(&self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe_with_priority::<E, F>(handler, Priority::NORMAL)
    }

    /// Subscribe with priority
    pub fn subscribe_with_priority<E: Event, F>(&self, handler: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
        let id = SubscriberId(sequence);
        let key = DeliveryKey { priority, sequence };

        let wrapped: DynamicHandler = Arc::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                handler(event);
            }
        });

        let mut handlers = self.handlers.write();
        let list = handlers.entry(TypeId::of::<E>()).or_default();
        let index = list.partition_point(|sub| sub.key <= key);
        list.insert(
            index,
            Subscription {
                id,
                key,
                handler: wrapped,
            },
        );

        id
    }

    /// Unsubscribe. Returns false if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut removed = false;
        for list in self.handlers.write().values_mut() {
            let before = list.len();
            list.retain(|sub| sub.id != id);
            removed |= list.len() != before;
        }
        removed
    }

    /// Deliver every queued event in publication order.
    ///
    /// Events published by handlers during delivery are delivered in the same
    /// call. Returns the number of events taken off the queue.
    pub fn process(&self) -> usize {
        let mut delivered = 0;

        loop {
            let Some(envelope) = self.queue.lock().pop_front() else {
                break;
            };
            delivered += 1;
            self.dispatch(&envelope);
        }

        delivered
    }

    /// Deliver only the queued events of type `E`, leaving the rest queued
    /// in their original order. Returns the number delivered.
    pub fn process_type<E: Event>(&self) -> usize {
        let type_id = TypeId::of::<E>();
        let matching: Vec<EventEnvelope> = {
            let mut queue = self.queue.lock();
            let (matching, rest): (VecDeque<_>, VecDeque<_>) =
                queue.drain(..).partition(|envelope| envelope.type_id == type_id);
            *queue = rest;
            matching.into()
        };

        for envelope in &matching {
            self.dispatch(envelope);
        }
        matching.len()
    }

    fn dispatch(&self, envelope: &EventEnvelope) {
        // Snapshot the handlers so they may subscribe or publish re-entrantly.
        let targets: Vec<DynamicHandler> = self
            .handlers
            .read()
            .get(&envelope.type_id)
            .map(|list| list.iter().map(|sub| Arc::clone(&sub.handler)).collect())
            .unwrap_or_default();

        log::trace!(
            "Dispatching {} to {} subscriber(s)",
            envelope.type_name,
            targets.len()
        );

        for handler in targets {
            handler(envelope.data.as_ref());
        }
    }

    /// Clear all events without processing
    pub fn clear(&self) {
        self.queue.lock().clear();
    }

    /// Get pending event count
    pub fn pending_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Check if there are pending events
    pub fn has_pending(&self) -> bool {
        !self.queue.lock().is_empty()
    }

    /// Number of subscribers registered for an event type
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.handlers
            .read()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("pending", &self.pending_count())
            .field("event_types", &self.handlers.read().len())
            .finish()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{Event, EventBus, Priority, SubscriberId};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    struct TestEvent(i32);
    struct OtherEvent;

    #[test]
    fn test_event_bus() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        bus.subscribe(move |_: &TestEvent| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(TestEvent(42));
        assert_eq!(bus.pending_count(), 1);
        assert_eq!(bus.process(), 1);

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_priority_lower_first() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let o = order.clone();
        bus.subscribe_with_priority(move |_: &TestEvent| o.lock().push("late"), Priority::LATE);
        let o = order.clone();
        bus.subscribe_with_priority(move |_: &TestEvent| o.lock().push("first"), Priority::FIRST);
        let o = order.clone();
        bus.subscribe(move |_: &TestEvent| o.lock().push("normal"));

        bus.publish(TestEvent(1));
        bus.process();

        assert_eq!(*order.lock(), vec!["first", "normal", "late"]);
    }

    #[test]
    fn test_same_priority_keeps_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["a", "b", "c"] {
            let o = order.clone();
            bus.subscribe_with_priority(move |_: &TestEvent| o.lock().push(name), Priority(5));
        }
        let o = order.clone();
        bus.subscribe_with_priority(move |_: &TestEvent| o.lock().push("zero"), Priority(0));

        bus.publish(TestEvent(1));
        bus.process();

        assert_eq!(*order.lock(), vec!["zero", "a", "b", "c"]);
    }

    #[test]
    fn test_events_delivered_in_publication_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        bus.subscribe(move |e: &TestEvent| s.lock().push(e.0));

        bus.publish(TestEvent(1));
        bus.publish(OtherEvent);
        bus.publish(TestEvent(2));
        bus.publish(TestEvent(3));
        assert_eq!(bus.process(), 4);

        assert_eq!(*seen.lock(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();
        let id = bus.subscribe(move |_: &TestEvent| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.subscriber_count::<TestEvent>(), 1);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(TestEvent(0));
        bus.process();

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handler_may_publish_during_dispatch() {
        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(AtomicU32::new(0));

        let inner = bus.clone();
        bus.subscribe(move |_: &TestEvent| inner.publish(OtherEvent));
        let s = seen.clone();
        bus.subscribe(move |_: &OtherEvent| {
            s.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(TestEvent(7));
        assert_eq!(bus.process(), 2);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_process_type_leaves_other_events_queued() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        bus.subscribe(move |e: &TestEvent| s.lock().push(e.0));
        let s = seen.clone();
        bus.subscribe(move |_: &OtherEvent| s.lock().push(0));

        bus.publish(TestEvent(1));
        bus.publish(OtherEvent);
        bus.publish(TestEvent(2));

        assert_eq!(bus.process_type::<OtherEvent>(), 1);
        assert_eq!(*seen.lock(), vec![0]);
        assert_eq!(bus.pending_count(), 2);

        assert_eq!(bus.process(), 2);
        assert_eq!(*seen.lock(), vec![0, 1, 2]);
        assert_eq!(bus.process_type::<OtherEvent>(), 0);
    }

    #[test]
    fn test_clear_drops_pending() {
        let bus = EventBus::new();
        bus.publish(TestEvent(1));
        bus.publish(TestEvent(2));
        bus.clear();
        assert_eq!(bus.process(), 0);
    }
}
