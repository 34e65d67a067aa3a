//! Core types for Hempline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;

pub use cart::{Cart, LineItem, SCHEMA_VERSION};
pub use id::*;
pub use price::display_amount;
