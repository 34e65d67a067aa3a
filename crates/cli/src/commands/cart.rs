//! Cart commands: show and mutate a file-backed cart.
//!
//! Each invocation opens the cart from the configured snapshot directory,
//! applies one operation, and lets the store re-persist. This is the same
//! load/mutate/persist cycle a page session performs, just one operation
//! per process.

use std::sync::Arc;

use rust_decimal::Decimal;

use hempline_cart::storage::{FileStorage, StorageError};
use hempline_cart::store::CartStore;
use hempline_core::{LineItem, ProductId, VariantId, display_amount};

use crate::config::CliConfig;

/// Open the configured file-backed cart store.
fn open_store(config: &CliConfig) -> Result<CartStore, StorageError> {
    let storage = FileStorage::new(&config.cart_dir)?;
    Ok(CartStore::with_key(
        Arc::new(storage),
        config.cart_key.clone(),
    ))
}

/// Print the current cart contents and totals.
#[allow(clippy::print_stdout)] // terminal output is this command's job
pub fn show(config: &CliConfig) -> Result<(), StorageError> {
    let cart = open_store(config)?.cart();

    if cart.items.is_empty() {
        println!("cart is empty");
        return Ok(());
    }

    for line in &cart.items {
        println!(
            "{:<24} x{:<4} {:>10} {:>12}",
            line.variant_id,
            line.qty,
            display_amount(line.unit_price),
            display_amount(line.line_total()),
        );
    }
    println!("{:>54}", format!("subtotal {}", display_amount(cart.subtotal)));
    println!("{:>54}", format!("total {}", display_amount(cart.total)));
    Ok(())
}

/// Add a line item (merging by variant).
#[allow(clippy::too_many_arguments)]
pub fn add(
    config: &CliConfig,
    variant_id: &str,
    product_id: Option<&str>,
    name: &str,
    price: Decimal,
    qty: i64,
    currency: Option<&str>,
    image: Option<&str>,
) -> Result<(), StorageError> {
    let store = open_store(config)?;
    let cart = store.add_item(LineItem {
        variant_id: VariantId::new(variant_id),
        product_id: product_id.map(ProductId::new),
        name: name.to_owned(),
        unit_price: price,
        qty,
        image: image.map(str::to_owned),
        currency: currency.map(str::to_owned),
    });
    tracing::info!(
        variant_id,
        items = cart.items.len(),
        subtotal = %cart.subtotal,
        "added to cart"
    );
    Ok(())
}

/// Set an absolute quantity for a variant (0 or less removes it).
pub fn update(config: &CliConfig, variant_id: &str, qty: i64) -> Result<(), StorageError> {
    let store = open_store(config)?;
    let cart = store.update_item(&VariantId::new(variant_id), qty);
    tracing::info!(variant_id, qty, subtotal = %cart.subtotal, "updated cart");
    Ok(())
}

/// Remove a variant from the cart.
pub fn remove(config: &CliConfig, variant_id: &str) -> Result<(), StorageError> {
    let store = open_store(config)?;
    let cart = store.remove_item(&VariantId::new(variant_id));
    tracing::info!(variant_id, items = cart.items.len(), "removed from cart");
    Ok(())
}

/// Empty the cart.
pub fn clear(config: &CliConfig) -> Result<(), StorageError> {
    let store = open_store(config)?;
    store.clear();
    tracing::info!("cleared cart");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(dir: &std::path::Path) -> CliConfig {
        CliConfig {
            cart_dir: dir.to_path_buf(),
            cart_key: "cart".to_owned(),
        }
    }

    #[test]
    fn test_add_then_reopen_sees_item() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        add(
            &config,
            "tincture-30ml",
            Some("tincture"),
            "Hemp Tincture 30ml",
            Decimal::new(2450, 2),
            2,
            Some("USD"),
            None,
        )
        .unwrap();

        let cart = open_store(&config).unwrap().cart();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.subtotal, Decimal::new(4900, 2));
    }

    #[test]
    fn test_update_and_remove_across_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        add(
            &config,
            "salve-2oz",
            None,
            "Hemp Salve",
            Decimal::new(1800, 2),
            1,
            None,
            None,
        )
        .unwrap();
        update(&config, "salve-2oz", 3).unwrap();
        assert_eq!(
            open_store(&config)
                .unwrap()
                .cart()
                .line(&VariantId::new("salve-2oz"))
                .unwrap()
                .qty,
            3
        );

        remove(&config, "salve-2oz").unwrap();
        assert!(open_store(&config).unwrap().cart().items.is_empty());
    }

    #[test]
    fn test_clear_across_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());

        add(
            &config,
            "gummies-10ct",
            None,
            "Hemp Gummies",
            Decimal::new(1299, 2),
            4,
            None,
            None,
        )
        .unwrap();
        clear(&config).unwrap();

        let cart = open_store(&config).unwrap().cart();
        assert!(cart.items.is_empty());
        assert_eq!(cart.subtotal, Decimal::ZERO);
    }
}
