//! # Inventory Store
//!
//! Barcode-keyed product table with guarded stock adjustment.
//!
//! ## Stock Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   add-item ──► adjust_stock(-qty) ──► cart line                        │
//! │   remove-item / undo add ──► adjust_stock(+qty)                        │
//! │   undo remove ──► adjust_stock(-qty)                                   │
//! │   cashier undo ──► adjust_stock(+qty) per sale line                    │
//! │                                                                         │
//! │   adjust_stock never leaves stock < 0: the delta is rejected whole     │
//! │   and the product is left untouched.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::validation;

/// The store's product table.
///
/// A `BTreeMap` keeps the default listing ordered by barcode.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: BTreeMap<String, Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a product. Never overwrites an existing barcode.
    ///
    /// ## Errors
    /// - `DuplicateProduct` if the barcode is already registered
    /// - `Validation` if the price or stock is out of range
    pub fn add(&mut self, product: Product) -> CoreResult<()> {
        validation::validate_price(product.price)?;
        validation::validate_stock(product.stock)?;

        if self.products.contains_key(&product.barcode) {
            return Err(CoreError::DuplicateProduct(product.barcode));
        }

        debug!(barcode = %product.barcode, stock = product.stock, "Product added");
        self.products.insert(product.barcode.clone(), product);
        Ok(())
    }

    pub fn get(&self, barcode: &str) -> Option<&Product> {
        self.products.get(barcode)
    }

    pub fn contains(&self, barcode: &str) -> bool {
        self.products.contains_key(barcode)
    }

    /// Applies `stock += delta`, returning the new stock level.
    ///
    /// ## Errors
    /// - `ProductNotFound` if the barcode is absent
    /// - `InsufficientStock` if the result would be negative; stock is
    ///   left as it was
    /// - `Validation` if the result would pass [`crate::MAX_STOCK`]
    pub fn adjust_stock(&mut self, barcode: &str, delta: i64) -> CoreResult<i64> {
        let product = self
            .products
            .get_mut(barcode)
            .ok_or_else(|| CoreError::ProductNotFound(barcode.to_string()))?;

        let next = product.stock.saturating_add(delta);
        if next < 0 {
            return Err(CoreError::InsufficientStock {
                barcode: barcode.to_string(),
                available: product.stock,
                requested: delta.saturating_neg(),
            });
        }

        validation::validate_stock(next)?;

        product.stock = next;
        debug!(barcode, delta, stock = next, "Stock adjusted");
        Ok(next)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products ordered by barcode.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Products sorted by ascending price, barcode breaking ties.
    pub fn by_price(&self) -> Vec<&Product> {
        let mut list: Vec<&Product> = self.products.values().collect();
        // BTreeMap order is already by barcode; a stable sort keeps it.
        list.sort_by_key(|p| p.price);
        list
    }

    /// Products sorted lexically by category, barcode breaking ties.
    pub fn by_category(&self) -> Vec<&Product> {
        let mut list: Vec<&Product> = self.products.values().collect();
        list.sort_by(|a, b| a.category.cmp(&b.category));
        list
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::NaiveDate;

    fn product(barcode: &str, price: i64, stock: i64, category: &str) -> Product {
        Product::new(
            barcode,
            format!("Item {barcode}"),
            Money::from_pounds(price, 0),
            stock,
            category,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
    }

    fn sample() -> Inventory {
        let mut inv = Inventory::new();
        inv.add(product("0003", 20, 5, "Snacks")).unwrap();
        inv.add(product("0001", 45, 50, "Dairy")).unwrap();
        inv.add(product("0002", 20, 8, "Bakery")).unwrap();
        inv
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut inv = sample();
        let err = inv.add(product("0001", 99, 1, "Other")).unwrap_err();
        assert_eq!(err, CoreError::DuplicateProduct("0001".to_string()));
        // Original record untouched
        assert_eq!(inv.get("0001").unwrap().price, Money::from_pounds(45, 0));
        assert_eq!(inv.len(), 3);
    }

    #[test]
    fn test_add_rejects_negative_stock() {
        let mut inv = Inventory::new();
        assert!(matches!(
            inv.add(product("0009", 1, -1, "X")),
            Err(CoreError::Validation(_))
        ));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_adjust_stock() {
        let mut inv = sample();
        assert_eq!(inv.adjust_stock("0001", -10).unwrap(), 40);
        assert_eq!(inv.adjust_stock("0001", 5).unwrap(), 45);
        assert_eq!(inv.adjust_stock("0001", -45).unwrap(), 0);
    }

    #[test]
    fn test_adjust_stock_never_negative() {
        let mut inv = sample();
        let err = inv.adjust_stock("0003", -6).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                barcode: "0003".to_string(),
                available: 5,
                requested: 6,
            }
        );
        assert_eq!(inv.get("0003").unwrap().stock(), 5);
    }

    #[test]
    fn test_adjust_stock_capped_at_max() {
        let mut inv = sample();
        assert!(matches!(
            inv.adjust_stock("0001", crate::MAX_STOCK),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            inv.adjust_stock("0001", i64::MAX),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(inv.get("0001").unwrap().stock(), 50);

        // A huge withdrawal is a stock shortage, not an overflow
        assert!(matches!(
            inv.adjust_stock("0001", -i64::MAX),
            Err(CoreError::InsufficientStock { available: 50, .. })
        ));
    }

    #[test]
    fn test_add_rejects_out_of_range_price() {
        let mut inv = Inventory::new();
        let mut pricey = product("0009", 1, 1, "X");
        pricey.price = Money::from_piastres(crate::MAX_PRICE_PIASTRES + 1);
        assert!(matches!(inv.add(pricey), Err(CoreError::Validation(_))));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_adjust_stock_unknown_barcode() {
        let mut inv = sample();
        assert_eq!(
            inv.adjust_stock("9999", 1),
            Err(CoreError::ProductNotFound("9999".to_string()))
        );
    }

    #[test]
    fn test_listings() {
        let inv = sample();
        let by_barcode: Vec<&str> = inv.products().map(|p| p.barcode.as_str()).collect();
        assert_eq!(by_barcode, ["0001", "0002", "0003"]);

        let by_price: Vec<&str> = inv.by_price().iter().map(|p| p.barcode.as_str()).collect();
        assert_eq!(by_price, ["0002", "0003", "0001"]);

        let by_category: Vec<&str> = inv
            .by_category()
            .iter()
            .map(|p| p.category.as_str())
            .collect();
        assert_eq!(by_category, ["Bakery", "Dairy", "Snacks"]);
    }
}
