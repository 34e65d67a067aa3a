//! Typed parsing of add-to-cart control metadata.
//!
//! Catalog rendering stamps string key/value metadata onto any clickable
//! control and tags it with the [`ADD_TO_CART_CLASS`] marker class; it never
//! references cart code. A [`ClickRouter`] watches page-wide clicks, picks
//! out marked controls, parses their metadata into a typed [`LineItem`] with
//! a fixed quantity of 1, and republishes it as a `cart:add` signal.
//!
//! Parsing is strict: a missing attribute or malformed price is a
//! [`ControlParseError`] and no event is published, rather than letting a
//! NaN-style value poison the cart totals.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use hempline_core::{LineItem, ProductId, VariantId};

use crate::bus::{CartBus, CartEvent};

/// Marker class identifying an add-to-cart control.
pub const ADD_TO_CART_CLASS: &str = "add-to-cart";

/// Metadata attribute names on an add-to-cart control.
pub mod attrs {
    /// Parent product identifier.
    pub const PRODUCT_ID: &str = "product-id";
    /// Variant identifier (merge key).
    pub const VARIANT_ID: &str = "variant-id";
    /// Display name.
    pub const NAME: &str = "name";
    /// Unit price as a decimal string.
    pub const PRICE: &str = "price";
    /// ISO 4217 currency code.
    pub const CURRENCY: &str = "currency";
    /// Optional image URL.
    pub const IMAGE: &str = "image";
}

/// Errors from parsing add-to-cart control metadata.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlParseError {
    /// A required attribute is absent.
    #[error("control is missing required attribute {0:?}")]
    MissingAttribute(&'static str),

    /// The price attribute is not a valid decimal string.
    #[error("control has malformed price {0:?}")]
    MalformedPrice(String),
}

/// A clicked element as seen by the page-wide click listener: its class
/// list and its attached string metadata.
#[derive(Debug, Clone, Default)]
pub struct ClickTarget {
    classes: Vec<String>,
    metadata: HashMap<String, String>,
}

impl ClickTarget {
    /// Build a target from its class list and metadata pairs.
    #[must_use]
    pub fn new<C, K, V>(
        classes: impl IntoIterator<Item = C>,
        metadata: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        C: Into<String>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            metadata: metadata
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether the element carries a class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.metadata.get(name).map(String::as_str)
    }
}

/// Parse control metadata into a line item with `qty = 1`.
///
/// Required attributes: `product-id`, `variant-id`, `name`, `price`,
/// `currency`. `image` is optional.
///
/// # Errors
///
/// Returns a [`ControlParseError`] for a missing required attribute or a
/// price that does not parse as a decimal.
pub fn parse_control(target: &ClickTarget) -> Result<LineItem, ControlParseError> {
    let required = |name: &'static str| {
        target
            .get(name)
            .ok_or(ControlParseError::MissingAttribute(name))
    };

    let price_raw = required(attrs::PRICE)?;
    let unit_price = Decimal::from_str(price_raw)
        .map_err(|_| ControlParseError::MalformedPrice(price_raw.to_owned()))?;

    Ok(LineItem {
        variant_id: VariantId::new(required(attrs::VARIANT_ID)?),
        product_id: Some(ProductId::new(required(attrs::PRODUCT_ID)?)),
        name: required(attrs::NAME)?.to_owned(),
        unit_price,
        qty: 1,
        image: target.get(attrs::IMAGE).map(str::to_owned),
        currency: Some(required(attrs::CURRENCY)?.to_owned()),
    })
}

/// Page-wide click listener that republishes marked controls as `cart:add`.
///
/// Independent of the store wiring: it only knows how to turn a click into
/// an event on the bus.
#[derive(Clone)]
pub struct ClickRouter {
    bus: CartBus,
}

impl ClickRouter {
    /// Create a router publishing onto `bus`.
    #[must_use]
    pub const fn new(bus: CartBus) -> Self {
        Self { bus }
    }

    /// Handle a page click.
    ///
    /// Returns `Ok(false)` for clicks on unmarked elements, `Ok(true)` when
    /// a `cart:add` event was published.
    ///
    /// # Errors
    ///
    /// Returns a [`ControlParseError`] for a marked control with malformed
    /// metadata; nothing is published in that case.
    pub fn handle_click(&self, target: &ClickTarget) -> Result<bool, ControlParseError> {
        if !target.has_class(ADD_TO_CART_CLASS) {
            return Ok(false);
        }

        let item = parse_control(target).inspect_err(|e| {
            tracing::warn!(error = %e, "ignoring add-to-cart control with bad metadata");
        })?;

        self.bus.publish(&CartEvent::Add(item));
        Ok(true)
    }
}
