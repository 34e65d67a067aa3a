//! Integration tests for Hempline.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hempline-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Snapshot round-trips through file-backed storage
//! - `cart_events` - Bus-driven mutation across independently wired fragments
//!
//! Shared helpers live here; the tests themselves are under `tests/`.

use rust_decimal::Decimal;

use hempline_core::{LineItem, ProductId, VariantId};

/// Build a line item the way the catalog would stamp it onto a control.
#[must_use]
pub fn line_item(variant: &str, price: Decimal, qty: i64) -> LineItem {
    LineItem {
        variant_id: VariantId::new(variant),
        product_id: Some(ProductId::new("hemp-product")),
        name: format!("Hemp Product ({variant})"),
        unit_price: price,
        qty,
        image: Some(format!("/img/{variant}.webp")),
        currency: Some("USD".to_owned()),
    }
}
