//! Synchronous in-process publish/subscribe for cart signals.
//!
//! The bus decouples mutation triggers (controls rendered anywhere on the
//! page) from the cart store: publishers and subscribers never hold
//! references to each other. Four fixed topics exist, one per store
//! operation; payload shapes are the [`CartEvent`] variants.
//!
//! Delivery is synchronous and in registration order: every handler runs to
//! completion before [`CartBus::publish`] returns, and two events published
//! in sequence are fully processed in order. There is no cancellation; an
//! event reaches every subscriber registered at publish time.

use std::sync::{Arc, Mutex};

use hempline_core::{LineItem, VariantId};

/// A cart signal, one variant per bus topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// `cart:add` - add a line item (merge by variant).
    Add(LineItem),
    /// `cart:update` - set an absolute quantity for a variant.
    Update {
        /// Target line.
        variant_id: VariantId,
        /// New absolute quantity; `<= 0` removes the line.
        qty: i64,
    },
    /// `cart:remove` - drop a line entirely.
    Remove {
        /// Target line.
        variant_id: VariantId,
    },
    /// `cart:clear` - reset the cart to empty.
    Clear,
}

impl CartEvent {
    /// The wire-style topic name for this event.
    #[must_use]
    pub const fn topic(&self) -> &'static str {
        match self {
            Self::Add(_) => "cart:add",
            Self::Update { .. } => "cart:update",
            Self::Remove { .. } => "cart:remove",
            Self::Clear => "cart:clear",
        }
    }
}

/// Handle returned by [`CartBus::subscribe`], used to unsubscribe when the
/// owning view unmounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&CartEvent) + Send + Sync>;

/// Page-wide event bus for cart signals.
///
/// Cheaply cloneable; clones publish to and subscribe on the same channel.
#[derive(Clone, Default)]
pub struct CartBus {
    inner: Arc<Mutex<BusInner>>,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Handler)>,
}

impl CartBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every published event.
    ///
    /// Handlers receive events in registration order. Filtering by topic is
    /// the handler's job; most match on the [`CartEvent`] variant.
    pub fn subscribe(
        &self,
        handler: impl Fn(&CartEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(handler)));
        id
    }

    /// Remove a previously registered handler. Unknown IDs are a no-op.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.lock();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Deliver an event to every current subscriber, synchronously and in
    /// registration order.
    ///
    /// The subscriber list is snapshotted before dispatch, so handlers may
    /// publish further events or mutate subscriptions without deadlocking;
    /// nested publishes complete before the outer one continues.
    pub fn publish(&self, event: &CartEvent) {
        tracing::trace!(topic = event.topic(), "dispatching cart event");
        let handlers: Vec<Handler> = self
            .lock()
            .subscribers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BusInner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rust_decimal::Decimal;

    use super::*;

    fn add_event(variant: &str) -> CartEvent {
        CartEvent::Add(LineItem {
            variant_id: VariantId::new(variant),
            product_id: None,
            name: variant.to_owned(),
            unit_price: Decimal::ONE,
            qty: 1,
            image: None,
            currency: None,
        })
    }

    #[test]
    fn test_topic_names() {
        assert_eq!(add_event("v1").topic(), "cart:add");
        assert_eq!(
            CartEvent::Update {
                variant_id: VariantId::new("v1"),
                qty: 2
            }
            .topic(),
            "cart:update"
        );
        assert_eq!(
            CartEvent::Remove {
                variant_id: VariantId::new("v1")
            }
            .topic(),
            "cart:remove"
        );
        assert_eq!(CartEvent::Clear.topic(), "cart:clear");
    }

    #[test]
    fn test_publish_reaches_subscriber_synchronously() {
        let bus = CartBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(&CartEvent::Clear);
        // Handler already ran by the time publish returned
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delivery_preserves_registration_order() {
        let bus = CartBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            bus.subscribe(move |_| order.lock().unwrap().push(tag));
        }

        bus.publish(&CartEvent::Clear);
        assert_eq!(*order.lock().unwrap(), ["first", "second", "third"]);
    }

    #[test]
    fn test_events_processed_in_dispatch_order() {
        let bus = CartBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(move |event| sink.lock().unwrap().push(event.topic()));

        bus.publish(&add_event("v1"));
        bus.publish(&CartEvent::Clear);
        assert_eq!(*seen.lock().unwrap(), ["cart:add", "cart:clear"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = CartBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(&CartEvent::Clear);
        bus.unsubscribe(id);
        bus.publish(&CartEvent::Clear);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_handler_may_republish_without_deadlock() {
        let bus = CartBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let republish = bus.clone();
        let sink = Arc::clone(&seen);
        bus.subscribe(move |event| {
            sink.lock().unwrap().push(event.topic());
            // A click listener republishing as cart:add does exactly this
            if matches!(event, CartEvent::Clear) {
                republish.publish(&add_event("v1"));
            }
        });

        bus.publish(&CartEvent::Clear);
        assert_eq!(*seen.lock().unwrap(), ["cart:clear", "cart:add"]);
    }

    #[test]
    fn test_publish_with_no_subscribers_is_noop() {
        let bus = CartBus::new();
        bus.publish(&CartEvent::Clear);
    }
}
