//! The cart state container.
//!
//! [`CartStore`] owns the single source of truth for cart contents. Every
//! mutation is a synchronous read-modify-write cycle: compute the new item
//! list, recompute derived totals, persist the full snapshot, update the
//! in-memory state. Once an operation returns, the new state is visible to
//! any subsequent read by any consumer.
//!
//! Store operations never fail. A storage write failure loses durability
//! for that write only (logged at `warn`); a missing or corrupt snapshot at
//! initialization degrades to the empty cart (logged at `debug`).

use std::sync::{Arc, Mutex};

use hempline_core::{Cart, LineItem, VariantId};

use crate::storage::CartStorage;

/// Storage key the cart snapshot lives under.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// The canonical cart state container.
///
/// Cheaply cloneable; clones share the same state and storage backend, so
/// multiple mounted views (drawer, page, mini-cart) observe one cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    storage: Arc<dyn CartStorage>,
    key: String,
    cart: Mutex<Cart>,
}

impl CartStore {
    /// Create a store under [`DEFAULT_STORAGE_KEY`], loading any prior
    /// snapshot from `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn CartStorage>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create a store under an explicit storage key.
    ///
    /// A missing, unreadable, or malformed snapshot is treated as "no prior
    /// cart": initialization never fails.
    #[must_use]
    pub fn with_key(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = load_snapshot(storage.as_ref(), &key);
        Self {
            inner: Arc::new(StoreInner {
                storage,
                key,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// A snapshot of the current cart state.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.lock().clone()
    }

    /// Add a line item, merging by variant.
    ///
    /// If a line with the same `variant_id` exists, its quantity is
    /// incremented by `item.qty` and its other fields (name, price,
    /// metadata) are kept; the incoming values are ignored. Otherwise the
    /// item is appended. Returns the resulting cart snapshot.
    pub fn add_item(&self, item: LineItem) -> Cart {
        self.mutate(|cart| {
            match cart
                .items
                .iter_mut()
                .find(|line| line.variant_id == item.variant_id)
            {
                Some(line) => line.qty += item.qty,
                None => cart.items.push(item),
            }
        })
    }

    /// Set the absolute quantity of a line, removing it when `qty <= 0`.
    ///
    /// Unknown variants are a no-op (the snapshot is still recomputed and
    /// re-persisted). Returns the resulting cart snapshot.
    pub fn update_item(&self, variant_id: &VariantId, qty: i64) -> Cart {
        self.mutate(|cart| {
            if let Some(line) = cart
                .items
                .iter_mut()
                .find(|line| &line.variant_id == variant_id)
            {
                line.qty = qty;
            }
            // Quantity edits are the sole removal path for qty <= 0
            cart.items.retain(|line| line.qty > 0);
        })
    }

    /// Remove a line entirely, regardless of quantity.
    ///
    /// Unknown variants are a no-op. Returns the resulting cart snapshot.
    pub fn remove_item(&self, variant_id: &VariantId) -> Cart {
        self.mutate(|cart| {
            cart.items.retain(|line| &line.variant_id != variant_id);
        })
    }

    /// Reset the cart to empty.
    pub fn clear(&self) -> Cart {
        self.mutate(|cart| cart.items.clear())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        // A poisoned lock means a mutation closure panicked; the items list
        // is still structurally valid and totals are recomputed on the next
        // mutation, so recover the guard rather than propagate.
        self.inner
            .cart
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn mutate(&self, apply: impl FnOnce(&mut Cart)) -> Cart {
        let mut cart = self.lock();
        apply(&mut cart);
        cart.recompute_totals();
        persist_snapshot(self.inner.storage.as_ref(), &self.inner.key, &cart);
        cart.clone()
    }
}

/// Load the initial cart from storage, defaulting to empty on any failure.
fn load_snapshot(storage: &dyn CartStorage, key: &str) -> Cart {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::empty(),
        Err(e) => {
            tracing::debug!(key, error = %e, "cart storage unreadable, starting empty");
            return Cart::empty();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(cart) => cart,
        Err(e) => {
            tracing::debug!(key, error = %e, "corrupt cart snapshot, starting empty");
            Cart::empty()
        }
    }
}

/// Persist the full cart snapshot. Failures cost durability only.
fn persist_snapshot(storage: &dyn CartStorage, key: &str, cart: &Cart) {
    let raw = match serde_json::to_string(cart) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to serialize cart snapshot");
            return;
        }
    };
    if let Err(e) = storage.set(key, &raw) {
        tracing::warn!(key, error = %e, "failed to persist cart snapshot");
    }
}
