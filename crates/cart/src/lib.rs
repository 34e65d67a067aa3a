//! Hempline Cart - the cart state container and its event protocol.
//!
//! This crate owns the canonical shopping-cart state for a storefront page
//! session. Disconnected UI fragments (product cards, the cart drawer, the
//! full-page cart view) never hold references to each other; they publish
//! [`bus::CartEvent`]s on a shared [`bus::CartBus`] and observe the
//! [`store::CartStore`] they all share.
//!
//! # Modules
//!
//! - [`storage`] - Durable key-value storage abstraction and backends
//! - [`store`] - The cart state container (add/update/remove/clear)
//! - [`bus`] - Synchronous in-process publish/subscribe with four topics
//! - [`controls`] - Typed parsing of add-to-cart control metadata
//! - [`session`] - Wiring of bus topics to store mutations and view state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bus;
pub mod controls;
pub mod session;
pub mod storage;
pub mod store;

pub use bus::{CartBus, CartEvent, SubscriptionId};
pub use controls::{ADD_TO_CART_CLASS, ClickRouter, ClickTarget, ControlParseError, parse_control};
pub use session::CartSession;
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
