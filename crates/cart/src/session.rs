//! Page-session wiring of the bus to the store.
//!
//! A [`CartSession`] is constructed once at page start and threaded to
//! consumers. It subscribes the four topic handlers on the bus, so any
//! fragment can mutate the shared cart by publishing events. The session
//! also owns the ancillary view-visibility state (drawer and full-page cart
//! open flags): opening the drawer on `cart:add` is a side effect of the
//! subscriber here, never of the store, and closing a view never touches
//! cart contents.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::bus::{CartBus, CartEvent, SubscriptionId};
use crate::controls::ClickRouter;
use crate::storage::CartStorage;
use crate::store::CartStore;

/// Ancillary presentation state: which cart views are open.
///
/// Not part of the cart entity; flipping these never mutates cart contents.
#[derive(Debug, Default)]
struct ViewState {
    drawer_open: AtomicBool,
    page_open: AtomicBool,
}

/// The cart subsystem for one page session.
#[derive(Clone)]
pub struct CartSession {
    store: CartStore,
    bus: CartBus,
    views: Arc<ViewState>,
    subscription: SubscriptionId,
}

impl CartSession {
    /// Start a session: load the store from `storage` and wire the four
    /// bus topics to its operations.
    #[must_use]
    pub fn start(storage: Arc<dyn CartStorage>) -> Self {
        Self::attach(CartStore::new(storage), CartBus::new())
    }

    /// Wire an existing store and bus together.
    #[must_use]
    pub fn attach(store: CartStore, bus: CartBus) -> Self {
        let views = Arc::new(ViewState::default());

        let handler_store = store.clone();
        let handler_views = Arc::clone(&views);
        let subscription = bus.subscribe(move |event| match event {
            CartEvent::Add(item) => {
                handler_store.add_item(item.clone());
                // Subscriber side effect: surface the cart after an add
                handler_views.drawer_open.store(true, Ordering::SeqCst);
            }
            CartEvent::Update { variant_id, qty } => {
                handler_store.update_item(variant_id, *qty);
            }
            CartEvent::Remove { variant_id } => {
                handler_store.remove_item(variant_id);
            }
            CartEvent::Clear => {
                handler_store.clear();
            }
        });

        Self {
            store,
            bus,
            views,
            subscription,
        }
    }

    /// The shared cart store.
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    /// The shared event bus.
    #[must_use]
    pub const fn bus(&self) -> &CartBus {
        &self.bus
    }

    /// A click router publishing onto this session's bus.
    #[must_use]
    pub fn click_router(&self) -> ClickRouter {
        ClickRouter::new(self.bus.clone())
    }

    /// Whether the cart drawer is open.
    #[must_use]
    pub fn drawer_open(&self) -> bool {
        self.views.drawer_open.load(Ordering::SeqCst)
    }

    /// Whether the full-page cart view is open.
    #[must_use]
    pub fn page_open(&self) -> bool {
        self.views.page_open.load(Ordering::SeqCst)
    }

    /// Open or close the drawer. Presentation only.
    pub fn set_drawer_open(&self, open: bool) {
        self.views.drawer_open.store(open, Ordering::SeqCst);
    }

    /// Open or close the full-page cart view. Presentation only.
    pub fn set_page_open(&self, open: bool) {
        self.views.page_open.store(open, Ordering::SeqCst);
    }

    /// Detach the store from the bus (listener cleanup on unmount).
    ///
    /// Events published afterwards reach remaining subscribers but no
    /// longer mutate the cart.
    pub fn detach(&self) {
        self.bus.unsubscribe(self.subscription);
    }
}
