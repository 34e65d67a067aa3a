//! Hempline Core - Shared types library.
//!
//! This crate provides common types used across all Hempline components:
//! - `cart` - Cart state container, storage, and event bus
//! - `cli` - Command-line tools for inspecting and mutating a cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure computation - no I/O, no
//! storage access, no event wiring. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, price formatting, and the cart data model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
