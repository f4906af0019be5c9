//! # Checkout Pricing
//!
//! Discount pipeline and the value types a checkout or a sale reversal
//! hands back to the caller.
//!
//! ## Discount Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   subtotal           Σ unit price × qty                                 │
//! │      │                                                                  │
//! │      ▼  − coupon     (LOVEEGYPT 10%, SAVE5 5%, OFFER20 20%, ...)        │
//! │   after coupon  ═══  Cart::total()                                      │
//! │      │                                                                  │
//! │      ▼  − customer   (Special only: personal rate, default 10%)         │
//! │   after customer                                                        │
//! │      │                                                                  │
//! │      ▼  − bulk       (only if after-customer ≥ threshold: 5%)           │
//! │   total                                                                 │
//! │                                                                         │
//! │   Each step rounds its own discount half-up to the piastre.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use souq_core::checkout::PricingPolicy;
//! use souq_core::{Money, DiscountRate};
//!
//! let policy = PricingPolicy {
//!     bulk_threshold: Money::from_pounds(1000, 0),
//!     bulk_discount: DiscountRate::from_percent(5),
//! };
//! let special = Some(DiscountRate::from_percent(10));
//! let breakdown = policy.price_amount(Money::from_pounds(1200, 0), Money::zero(), special);
//! assert_eq!(breakdown.total, Money::from_pounds(1026, 0));
//! ```

use serde::Serialize;

use crate::cart::Cart;
use crate::customer::CustomerProfile;
use crate::money::Money;
use crate::types::{CashierId, DiscountRate, SaleId, SaleLine};

// =============================================================================
// Pricing Policy
// =============================================================================

/// The store-wide bulk rule. Built from
/// [`crate::settings::StoreSettings::pricing_policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingPolicy {
    pub bulk_threshold: Money,
    pub bulk_discount: DiscountRate,
}

/// Every amount the discount pipeline produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub coupon_discount: Money,
    pub customer_discount: Money,
    pub bulk_discount: Money,
    pub total: Money,
}

impl PriceBreakdown {
    /// Everything taken off the subtotal.
    pub fn discount(&self) -> Money {
        self.coupon_discount + self.customer_discount + self.bulk_discount
    }
}

impl PricingPolicy {
    /// Prices a cart for a customer.
    pub fn price(&self, cart: &Cart, profile: &CustomerProfile) -> PriceBreakdown {
        let subtotal = cart.subtotal();
        let coupon_discount = subtotal - cart.total();
        let personal = match profile {
            CustomerProfile::Special { discount } => Some(*discount),
            CustomerProfile::WalkIn | CustomerProfile::Online { .. } => None,
        };
        self.price_amount(subtotal, coupon_discount, personal)
    }

    /// Runs the pipeline from a subtotal and an already-computed coupon
    /// discount.
    pub fn price_amount(
        &self,
        subtotal: Money,
        coupon_discount: Money,
        personal: Option<DiscountRate>,
    ) -> PriceBreakdown {
        let after_coupon = subtotal - coupon_discount;

        let customer_discount = personal
            .map(|rate| after_coupon.discount_amount(rate))
            .unwrap_or_default();
        let after_customer = after_coupon - customer_discount;

        let bulk_discount = if after_customer >= self.bulk_threshold {
            after_customer.discount_amount(self.bulk_discount)
        } else {
            Money::zero()
        };

        PriceBreakdown {
            subtotal,
            coupon_discount,
            customer_discount,
            bulk_discount,
            total: after_customer - bulk_discount,
        }
    }
}

// =============================================================================
// Checkout Results
// =============================================================================

/// What happened to the coupon code offered at the till.
///
/// A bad code never blocks the checkout; it's reported and the sale goes
/// through without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CouponOutcome {
    NotOffered,
    Applied { code: String },
    /// The cart already carried this coupon; the offered one was ignored.
    AlreadyApplied { code: String },
    Rejected { code: String, reason: String },
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub sale_id: SaleId,
    pub customer_id: String,
    pub customer_name: String,
    pub cashier: CashierId,
    pub online: bool,
    pub lines: Vec<SaleLine>,
    pub pricing: PriceBreakdown,
    pub coupon: CouponOutcome,
}

/// Result of a cashier undoing its last bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleReversal {
    pub sale_id: SaleId,
    pub cashier: CashierId,
    /// Lines whose quantities went back on the shelf.
    pub restocked: Vec<SaleLine>,
    /// False when the undo stack pointed at a sale the ledger no longer had.
    pub found_in_ledger: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use chrono::NaiveDate;

    fn policy() -> PricingPolicy {
        PricingPolicy {
            bulk_threshold: Money::from_pounds(1000, 0),
            bulk_discount: DiscountRate::from_percent(5),
        }
    }

    fn cart_worth(pounds: i64) -> Cart {
        let product = Product::new(
            "0022",
            "Calculator",
            Money::from_pounds(pounds, 0),
            10,
            "School",
            NaiveDate::from_ymd_opt(2027, 12, 31).unwrap(),
        );
        let mut cart = Cart::new();
        cart.add_item(&product, 1).unwrap();
        cart
    }

    #[test]
    fn test_bulk_discount_over_threshold() {
        let b = policy().price(&cart_worth(1200), &CustomerProfile::WalkIn);
        assert_eq!(b.bulk_discount, Money::from_pounds(60, 0));
        assert_eq!(b.total, Money::from_pounds(1140, 0));
    }

    #[test]
    fn test_special_then_bulk_compound() {
        let profile = CustomerProfile::Special {
            discount: DiscountRate::from_percent(10),
        };
        let b = policy().price(&cart_worth(1200), &profile);
        assert_eq!(b.customer_discount, Money::from_pounds(120, 0));
        assert_eq!(b.bulk_discount, Money::from_pounds(54, 0));
        assert_eq!(b.total, Money::from_pounds(1026, 0));
        assert_eq!(b.discount(), Money::from_pounds(174, 0));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let b = policy().price(&cart_worth(1000), &CustomerProfile::WalkIn);
        assert_eq!(b.total, Money::from_pounds(950, 0));

        let b = policy().price(&cart_worth(999), &CustomerProfile::WalkIn);
        assert_eq!(b.bulk_discount, Money::zero());
    }

    #[test]
    fn test_special_discount_can_drop_below_threshold() {
        let profile = CustomerProfile::Special {
            discount: DiscountRate::from_percent(10),
        };
        // 1100 → 990 after personal discount, under the bulk line.
        let b = policy().price(&cart_worth(1100), &profile);
        assert_eq!(b.bulk_discount, Money::zero());
        assert_eq!(b.total, Money::from_pounds(990, 0));
    }

    #[test]
    fn test_coupon_applies_first() {
        let mut cart = cart_worth(1100);
        cart.apply_coupon("OFFER20").unwrap();
        // 1100 → 880 with the coupon, no bulk discount.
        let b = policy().price(&cart, &CustomerProfile::WalkIn);
        assert_eq!(b.coupon_discount, Money::from_pounds(220, 0));
        assert_eq!(b.bulk_discount, Money::zero());
        assert_eq!(b.total, Money::from_pounds(880, 0));
    }
}
