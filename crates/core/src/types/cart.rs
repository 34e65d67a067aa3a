//! The cart data model.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s plus derived totals. The
//! totals are never stored as independent truth: every mutation recomputes
//! them from the items, so they cannot drift. Field names serialize in
//! camelCase to match the persisted snapshot layout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{ProductId, VariantId};

/// Current persisted snapshot schema version.
///
/// Snapshots written before versioning carry no tag; they are read as
/// version 1.
pub const SCHEMA_VERSION: u32 = 1;

/// One product+size selection and its quantity within a cart.
///
/// `variant_id` is the merge key: a cart never holds two lines with the
/// same variant. `name`, `image`, and `currency` are opaque display
/// metadata passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique identifier for a specific product+size combination.
    pub variant_id: VariantId,
    /// Parent product identifier (informational).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Display name, opaque to the store.
    pub name: String,
    /// Per-unit price in the currency's standard unit (full precision).
    pub unit_price: Decimal,
    /// Quantity. Expected positive; zero or negative triggers removal on
    /// update. Not validated on add.
    pub qty: i64,
    /// Optional image URL (opaque).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Optional ISO 4217 currency code (opaque).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl LineItem {
    /// The line's contribution to the cart subtotal.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.qty)
    }
}

/// The aggregate of line items plus derived subtotal/total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Snapshot schema version. Absent in pre-versioning snapshots.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Line items in insertion order. Merges keep the original position.
    pub items: Vec<LineItem>,
    /// Derived: sum of `unit_price * qty` over all items.
    pub subtotal: Decimal,
    /// Derived: currently always equal to `subtotal` (no tax/shipping model).
    pub total: Decimal,
}

const fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for Cart {
    fn default() -> Self {
        Self::empty()
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.qty).sum()
    }

    /// Look up a line by variant.
    #[must_use]
    pub fn line(&self, variant_id: &VariantId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.variant_id == variant_id)
    }

    /// Recompute `subtotal` and `total` from the current items.
    ///
    /// Must be called after every items mutation; the totals are never
    /// authoritative on their own.
    pub fn recompute_totals(&mut self) {
        self.subtotal = self.items.iter().map(LineItem::line_total).sum();
        self.total = self.subtotal;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(variant: &str, price: Decimal, qty: i64) -> LineItem {
        LineItem {
            variant_id: VariantId::new(variant),
            product_id: None,
            name: variant.to_owned(),
            unit_price: price,
            qty,
            image: None,
            currency: None,
        }
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::empty();
        assert!(cart.items.is_empty());
        assert_eq!(cart.subtotal, Decimal::ZERO);
        assert_eq!(cart.total, Decimal::ZERO);
    }

    #[test]
    fn test_recompute_totals() {
        let mut cart = Cart::empty();
        cart.items.push(item("a", Decimal::new(999, 2), 2)); // 9.99 x 2
        cart.items.push(item("b", Decimal::new(2450, 2), 1)); // 24.50 x 1
        cart.recompute_totals();

        assert_eq!(cart.subtotal, Decimal::new(4448, 2)); // 44.48
        assert_eq!(cart.total, cart.subtotal);
    }

    #[test]
    fn test_line_total_full_precision() {
        let line = item("a", Decimal::new(3_333, 3), 3); // 3.333 x 3
        assert_eq!(line.line_total(), Decimal::new(9_999, 3)); // 9.999, unrounded
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let mut cart = Cart::empty();
        cart.items.push(item("a", Decimal::ONE, 2));
        cart.items.push(item("b", Decimal::ONE, 3));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_serde_camel_case_wire_names() {
        let mut cart = Cart::empty();
        cart.items.push(item("tincture-30ml", Decimal::new(999, 2), 1));
        cart.recompute_totals();

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.contains("\"schemaVersion\":1"));
        assert!(json.contains("\"variantId\":\"tincture-30ml\""));
        assert!(json.contains("\"unitPrice\""));
    }

    #[test]
    fn test_versionless_snapshot_reads_as_v1() {
        let json = r#"{"items":[],"subtotal":"0","total":"0"}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_numeric_amount_snapshot_parses() {
        // Legacy browser snapshots carry plain JSON numbers, not the
        // string-encoded decimals this crate writes
        let json = r#"{"items":[{"variantId":"v1","name":"Widget","unitPrice":9.99,"qty":2}],"subtotal":19.98,"total":19.98}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        let line = cart.line(&VariantId::new("v1")).unwrap();
        assert_eq!(line.unit_price, Decimal::new(999, 2));
        assert_eq!(cart.subtotal, Decimal::new(1998, 2));
    }
}
