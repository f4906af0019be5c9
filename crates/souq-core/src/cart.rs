//! # Shopping Cart
//!
//! Per-customer cart: line items, an action log for single-step undo, and at
//! most one coupon.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation          Line items               Action log   Inventory     │
//! │  ─────────          ──────────               ──────────   ─────────     │
//! │                                                                         │
//! │  add_item(p, n)     +n (merge or new line)   push ADD n   (caller -n)   │
//! │                                                                         │
//! │  remove_item(b, n)  -min(n, held)            push REMOVE  (caller +m)   │
//! │                                              m if m > 0                 │
//! │                                                                         │
//! │  undo()  on ADD     -min(n, held)            pop          +removed      │
//! │          on REMOVE  +m                       pop          -m            │
//! │                                                                         │
//! │  apply_coupon(c)    (unchanged)              (unchanged)  (unchanged)   │
//! │                                                                         │
//! │  finalize()         cleared, returned        cleared      (unchanged)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line item has quantity > 0; a line that reaches zero is dropped
//! - The coupon is set at most once until the cart is cleared
//! - An undo pops exactly one action, even when it fails

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::coupon::{self, Coupon};
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::money::Money;
use crate::types::{CartAction, CartActionKind, CartItem, Product};
use crate::validation;

/// What a successful [`Cart::undo`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "undone", rename_all = "snake_case")]
pub enum CartUndo {
    /// An ADD was reversed: units left the cart and went back on the shelf.
    Add { barcode: String, restored: i64 },
    /// A REMOVE was reversed: units came off the shelf and back into the cart.
    Remove { barcode: String, returned: i64 },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: BTreeMap<String, CartItem>,
    actions: Vec<CartAction>,
    coupon: Option<Coupon>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` units of `product`, merging into an existing line.
    ///
    /// Does not touch inventory: the caller takes the stock first.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity <= 0` or the line would hold more
    ///   than [`crate::MAX_STOCK`] units
    /// - `Validation` if the unit price is out of range
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        validation::validate_price(product.price)?;

        let held = self.item(&product.barcode).map_or(0, |item| item.quantity);
        if held.saturating_add(quantity) > crate::MAX_STOCK {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        self.add_line(product, quantity);
        self.actions.push(CartAction::add(&product.barcode, quantity));
        debug!(barcode = %product.barcode, quantity, "Cart add");
        Ok(())
    }

    /// Removes up to `quantity` units of `barcode`.
    ///
    /// Returns how many units actually left the cart, capped at what the
    /// line held (0 when the barcode isn't in the cart, in which case no
    /// action is logged).
    pub fn remove_item(&mut self, barcode: &str, quantity: i64) -> CoreResult<i64> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        let removed = self.take_line(barcode, quantity);
        if removed > 0 {
            self.actions.push(CartAction::remove(barcode, removed));
            debug!(barcode, requested = quantity, removed, "Cart remove");
        }
        Ok(removed)
    }

    /// Attaches a coupon from the catalog.
    ///
    /// ## Errors
    /// - `CouponAlreadyApplied` if one is already attached (the existing
    ///   coupon is kept)
    /// - `InvalidCoupon` if the code is unknown
    pub fn apply_coupon(&mut self, code: &str) -> CoreResult<&Coupon> {
        if let Some(existing) = &self.coupon {
            return Err(CoreError::CouponAlreadyApplied(existing.code.clone()));
        }

        let coupon = coupon::lookup(code)?;
        debug!(code, "Coupon applied");
        Ok(self.coupon.insert(coupon))
    }

    /// Reverses the most recent logged action and reconciles inventory.
    ///
    /// The action is consumed whether or not the reversal succeeds; on
    /// failure neither the cart nor the inventory is modified.
    ///
    /// ## Errors
    /// - `NoActionsToUndo` if the log is empty
    /// - `NothingToUndo` when undoing an ADD whose units are already gone
    /// - `ProductNotFound` / `InsufficientStock` when undoing a REMOVE
    ///   whose units can no longer come off the shelf
    pub fn undo(&mut self, inventory: &mut Inventory) -> CoreResult<CartUndo> {
        let action = self.actions.pop().ok_or(CoreError::NoActionsToUndo)?;

        match action.kind {
            CartActionKind::Add => {
                let held = self
                    .items
                    .get(&action.barcode)
                    .map(|item| item.quantity)
                    .unwrap_or(0);
                let removable = held.min(action.quantity);
                if removable <= 0 {
                    return Err(CoreError::NothingToUndo(action.barcode));
                }

                inventory.adjust_stock(&action.barcode, removable)?;
                self.take_line(&action.barcode, removable);
                debug!(barcode = %action.barcode, restored = removable, "Undid cart add");

                Ok(CartUndo::Add {
                    barcode: action.barcode,
                    restored: removable,
                })
            }
            CartActionKind::Remove => {
                let product = inventory
                    .get(&action.barcode)
                    .cloned()
                    .ok_or_else(|| CoreError::ProductNotFound(action.barcode.clone()))?;

                inventory.adjust_stock(&action.barcode, -action.quantity)?;
                self.add_line(&product, action.quantity);
                debug!(barcode = %action.barcode, returned = action.quantity, "Undid cart remove");

                Ok(CartUndo::Remove {
                    barcode: action.barcode,
                    returned: action.quantity,
                })
            }
        }
    }

    /// Empties line items, action log and coupon.
    pub fn clear(&mut self) {
        self.items.clear();
        self.actions.clear();
        self.coupon = None;
    }

    /// Hands the line items over to a sale and resets the cart.
    ///
    /// Past this point per-item undo no longer applies.
    pub fn finalize(&mut self) -> Vec<CartItem> {
        let items = std::mem::take(&mut self.items).into_values().collect();
        self.clear();
        items
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Σ unit price × quantity, before any coupon.
    pub fn subtotal(&self) -> Money {
        self.items.values().map(CartItem::line_total).sum()
    }

    /// Subtotal with the coupon taken off (if any).
    ///
    /// The coupon discount is rounded half-up to the piastre, so a LE 0.01
    /// cart with `SAVE5` still totals LE 0.01.
    pub fn total(&self) -> Money {
        let subtotal = self.subtotal();
        match &self.coupon {
            Some(coupon) => subtotal.apply_discount(coupon.rate),
            None => subtotal,
        }
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Line items ordered by barcode.
    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.values()
    }

    pub fn item(&self, barcode: &str) -> Option<&CartItem> {
        self.items.get(barcode)
    }

    /// Number of actions an undo can still walk back.
    pub fn history_len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Internals (no logging of actions)
    // =========================================================================

    fn add_line(&mut self, product: &Product, quantity: i64) {
        self.items
            .entry(product.barcode.clone())
            .and_modify(|item| item.quantity += quantity)
            .or_insert_with(|| CartItem::from_product(product, quantity));
    }

    fn take_line(&mut self, barcode: &str, quantity: i64) -> i64 {
        let Some(item) = self.items.get_mut(barcode) else {
            return 0;
        };

        if quantity >= item.quantity {
            let removed = item.quantity;
            self.items.remove(barcode);
            removed
        } else {
            item.quantity -= quantity;
            quantity
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn milk() -> Product {
        Product::new(
            "0001",
            "Milk 1L",
            Money::from_pounds(45, 0),
            50,
            "Dairy",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
    }

    fn bread() -> Product {
        Product::new(
            "0002",
            "Baladi Bread",
            Money::from_pounds(5, 50),
            100,
            "Bakery",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        )
    }

    fn stocked() -> Inventory {
        let mut inv = Inventory::new();
        inv.add(milk()).unwrap();
        inv.add(bread()).unwrap();
        inv
    }

    #[test]
    fn test_add_merges_lines() {
        let mut cart = Cart::new();
        cart.add_item(&milk(), 2).unwrap();
        cart.add_item(&milk(), 3).unwrap();
        cart.add_item(&bread(), 4).unwrap();

        assert_eq!(cart.items().count(), 2);
        assert_eq!(cart.item("0001").unwrap().quantity, 5);
        assert_eq!(cart.subtotal(), Money::from_pounds(247, 0));
        assert_eq!(cart.history_len(), 3);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(&milk(), 0), Err(CoreError::InvalidQuantity(0)));
        assert_eq!(cart.add_item(&milk(), -2), Err(CoreError::InvalidQuantity(-2)));
        assert!(cart.is_empty());
        assert_eq!(cart.history_len(), 0);
    }

    #[test]
    fn test_line_bounded_so_totals_fit() {
        let mut cart = Cart::new();
        let mut pricey = milk();
        pricey.price = Money::from_piastres(crate::MAX_PRICE_PIASTRES);

        cart.add_item(&pricey, crate::MAX_STOCK).unwrap();
        assert_eq!(
            cart.subtotal(),
            Money::from_piastres(crate::MAX_PRICE_PIASTRES * crate::MAX_STOCK)
        );
        assert_eq!(cart.add_item(&pricey, 1), Err(CoreError::InvalidQuantity(1)));

        pricey.price = Money::from_piastres(1_000_000_000_000_000);
        assert!(matches!(cart.add_item(&pricey, 1), Err(CoreError::Validation(_))));
        assert_eq!(cart.history_len(), 1);
    }

    #[test]
    fn test_remove_caps_at_held_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&milk(), 3).unwrap();

        assert_eq!(cart.remove_item("0001", 10).unwrap(), 3);
        assert!(cart.item("0001").is_none());
        assert_eq!(cart.history_len(), 2);
    }

    #[test]
    fn test_remove_missing_barcode_logs_nothing() {
        let mut cart = Cart::new();
        cart.add_item(&milk(), 1).unwrap();

        assert_eq!(cart.remove_item("0002", 1).unwrap(), 0);
        assert_eq!(cart.history_len(), 1);
        assert_eq!(cart.remove_item("0001", 0), Err(CoreError::InvalidQuantity(0)));
    }

    #[test]
    fn test_coupon_only_once() {
        let mut cart = Cart::new();
        cart.add_item(&milk(), 10).unwrap();

        assert_eq!(cart.apply_coupon("SAVE5").unwrap().code, "SAVE5");
        assert_eq!(cart.total(), Money::from_piastres(42750));

        assert_eq!(
            cart.apply_coupon("OFFER20"),
            Err(CoreError::CouponAlreadyApplied("SAVE5".to_string()))
        );
        assert_eq!(cart.total(), Money::from_piastres(42750));
    }

    #[test]
    fn test_coupon_discount_rounds_to_piastre() {
        let mut cart = Cart::new();
        let mut gum = bread();
        gum.price = Money::from_piastres(1);
        cart.add_item(&gum, 1).unwrap();
        cart.apply_coupon("SAVE5").unwrap();

        assert_eq!(cart.total(), Money::from_piastres(1));
    }

    #[test]
    fn test_invalid_coupon_leaves_cart_open() {
        let mut cart = Cart::new();
        cart.add_item(&milk(), 1).unwrap();

        assert!(matches!(cart.apply_coupon("save5"), Err(CoreError::InvalidCoupon(_))));
        assert!(cart.coupon().is_none());
        assert!(cart.apply_coupon("LOVEEGYPT").is_ok());
    }

    #[test]
    fn test_undo_add_restores_stock() {
        let mut inv = stocked();
        let mut cart = Cart::new();
        inv.adjust_stock("0001", -5).unwrap();
        cart.add_item(&milk(), 5).unwrap();

        let undone = cart.undo(&mut inv).unwrap();
        assert_eq!(
            undone,
            CartUndo::Add {
                barcode: "0001".to_string(),
                restored: 5
            }
        );
        assert!(cart.is_empty());
        assert_eq!(inv.get("0001").unwrap().stock(), 50);
        assert_eq!(cart.history_len(), 0);
    }

    #[test]
    fn test_undo_remove_takes_stock_back() {
        let mut inv = stocked();
        let mut cart = Cart::new();
        inv.adjust_stock("0002", -4).unwrap();
        cart.add_item(&bread(), 4).unwrap();
        let removed = cart.remove_item("0002", 3).unwrap();
        inv.adjust_stock("0002", removed).unwrap();

        let undone = cart.undo(&mut inv).unwrap();
        assert!(matches!(undone, CartUndo::Remove { returned: 3, .. }));
        assert_eq!(cart.item("0002").unwrap().quantity, 4);
        assert_eq!(inv.get("0002").unwrap().stock(), 96);
    }

    #[test]
    fn test_undo_walks_log_backward() {
        let mut inv = stocked();
        let mut cart = Cart::new();
        inv.adjust_stock("0001", -2).unwrap();
        cart.add_item(&milk(), 2).unwrap();
        inv.adjust_stock("0002", -1).unwrap();
        cart.add_item(&bread(), 1).unwrap();

        assert!(matches!(
            cart.undo(&mut inv).unwrap(),
            CartUndo::Add { ref barcode, .. } if barcode == "0002"
        ));
        assert!(matches!(
            cart.undo(&mut inv).unwrap(),
            CartUndo::Add { ref barcode, .. } if barcode == "0001"
        ));
        assert_eq!(cart.undo(&mut inv), Err(CoreError::NoActionsToUndo));
    }

    #[test]
    fn test_failed_undo_consumes_action() {
        let mut inv = stocked();
        let mut cart = Cart::new();
        inv.adjust_stock("0001", -2).unwrap();
        cart.add_item(&milk(), 2).unwrap();
        let removed = cart.remove_item("0001", 2).unwrap();
        inv.adjust_stock("0001", removed).unwrap();

        // Shelf emptied by someone else: the REMOVE can't be reversed.
        inv.adjust_stock("0001", -50).unwrap();
        assert!(matches!(
            cart.undo(&mut inv),
            Err(CoreError::InsufficientStock { .. })
        ));
        assert!(cart.is_empty());
        assert_eq!(inv.get("0001").unwrap().stock(), 0);

        // Next undo hits the ADD, whose units are no longer in the cart.
        assert_eq!(
            cart.undo(&mut inv),
            Err(CoreError::NothingToUndo("0001".to_string()))
        );
        assert_eq!(cart.history_len(), 0);
    }

    #[test]
    fn test_undo_leaves_coupon() {
        let mut inv = stocked();
        let mut cart = Cart::new();
        inv.adjust_stock("0001", -1).unwrap();
        cart.add_item(&milk(), 1).unwrap();
        cart.apply_coupon("SAVE5").unwrap();

        cart.undo(&mut inv).unwrap();
        assert_eq!(cart.coupon().unwrap().code, "SAVE5");
    }

    #[test]
    fn test_finalize_clears_everything() {
        let mut cart = Cart::new();
        cart.add_item(&milk(), 1).unwrap();
        cart.add_item(&bread(), 2).unwrap();
        cart.apply_coupon("SAVE5").unwrap();

        let items = cart.finalize();
        let barcodes: Vec<&str> = items.iter().map(|i| i.barcode.as_str()).collect();
        assert_eq!(barcodes, ["0001", "0002"]);
        assert!(cart.is_empty());
        assert!(cart.coupon().is_none());
        assert_eq!(cart.history_len(), 0);
    }
}
