//! # Domain Types
//!
//! Core domain types used throughout Souq POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │   SaleRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  barcode (key)  │──►│  barcode        │──►│  id (S1, S2..)  │       │
//! │  │  name, category │   │  unit_price     │   │  lines          │       │
//! │  │  price, stock   │   │  quantity > 0   │   │  total          │       │
//! │  │  expiry         │   └─────────────────┘   │  created_at     │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRate   │   │   CartAction    │   │   CashierId     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Add | Remove   │   │  Regular(idx)   │       │
//! │  │  500 = 5%       │   │  barcode, qty   │   │  SpecialNeeds   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01%; 500 bps = 5% (the `SAVE5` coupon).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        DiscountRate(pct * 100)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{:.2}%", self.percentage())
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on the shelf.
///
/// `stock` is only writable inside the crate: every quantity change goes
/// through [`crate::inventory::Inventory::adjust_stock`], which refuses to
/// drive it negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique business identifier.
    pub barcode: String,

    /// Display name shown to the cashier and in reports.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Units on the shelf (never negative).
    pub(crate) stock: i64,

    /// Aisle category ("Dairy", "Snacks", ...).
    pub category: String,

    /// Best-before date.
    pub expiry: NaiveDate,
}

impl Product {
    pub fn new(
        barcode: impl Into<String>,
        name: impl Into<String>,
        price: Money,
        stock: i64,
        category: impl Into<String>,
        expiry: NaiveDate,
    ) -> Self {
        Product {
            barcode: barcode.into(),
            name: name.into(),
            price,
            stock,
            category: category.into(),
            expiry,
        }
    }

    /// Current stock level.
    #[inline]
    pub fn stock(&self) -> i64 {
        self.stock
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in a shopping cart.
///
/// Uses the snapshot pattern: name, category and price are frozen when the
/// barcode is first added, so later catalog edits don't change the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub barcode: String,
    pub name: String,
    pub category: String,
    pub unit_price: Money,
    /// Always > 0 while the line exists.
    pub quantity: i64,
}

impl CartItem {
    /// Creates a cart line from a product snapshot.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartItem {
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Action Log
// =============================================================================

/// Kind of committed cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartActionKind {
    Add,
    Remove,
}

/// Immutable log entry recording a committed cart mutation.
///
/// For `Remove`, `quantity` is what was actually taken out, not what was
/// requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAction {
    pub kind: CartActionKind,
    pub barcode: String,
    pub quantity: i64,
}

impl CartAction {
    pub fn add(barcode: impl Into<String>, quantity: i64) -> Self {
        CartAction {
            kind: CartActionKind::Add,
            barcode: barcode.into(),
            quantity,
        }
    }

    pub fn remove(barcode: impl Into<String>, quantity: i64) -> Self {
        CartAction {
            kind: CartActionKind::Remove,
            barcode: barcode.into(),
            quantity,
        }
    }
}

// =============================================================================
// Sale Id
// =============================================================================

/// Sale identifier: a process-wide monotonic counter shown as `S1`, `S2`, ...
///
/// Issued only by [`crate::ledger::SalesLedger::next_id`]; never reused, even
/// after the sale is reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SaleId(u64);

/// Prefix of the human-readable sale id.
pub const SALE_ID_PREFIX: &str = "S";

impl SaleId {
    #[inline]
    pub const fn new(seq: u64) -> Self {
        SaleId(seq)
    }

    #[inline]
    pub const fn seq(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SALE_ID_PREFIX, self.0)
    }
}

impl FromStr for SaleId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix(SALE_ID_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(SaleId)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "sale id".to_string(),
                reason: format!("expected {}<number>", SALE_ID_PREFIX),
            })
    }
}

impl From<SaleId> for String {
    fn from(id: SaleId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SaleId {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// =============================================================================
// Cashier Id
// =============================================================================

/// Identifies a till: one of the regular cashiers or the dedicated
/// special-needs cashier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashierId {
    /// Zero-based index into the regular cashiers.
    Regular(usize),
    SpecialNeeds,
}

impl fmt::Display for CashierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CashierId::Regular(idx) => write!(f, "CASH{}", idx + 1),
            CashierId::SpecialNeeds => write!(f, "SPECIAL"),
        }
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// A line of a completed sale (frozen copy of the cart line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub barcode: String,
    pub name: String,
    pub category: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl From<CartItem> for SaleLine {
    fn from(item: CartItem) -> Self {
        SaleLine {
            barcode: item.barcode,
            name: item.name,
            category: item.category,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// A completed sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,
    pub customer_id: String,
    pub online: bool,
    /// Cashier whose undo stack references this sale.
    pub cashier: CashierId,
    pub lines: Vec<SaleLine>,
    /// Sum of line totals before any discount.
    pub subtotal: Money,
    /// Everything taken off: coupon + customer + bulk.
    pub discount: Money,
    pub total: Money,
    pub coupon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SaleLine {
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

impl SaleRecord {
    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How an online customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    CashOnDelivery,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::CashOnDelivery => write!(f, "cash on delivery"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" | "credit" | "debit" | "visa" => Ok(PaymentMethod::Card),
            "cod" | "cash on delivery" | "cash-on-delivery" => Ok(PaymentMethod::CashOnDelivery),
            _ => Err(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec!["cash".into(), "card".into(), "cod".into()],
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Product {
        Product::new(
            "0001",
            "Milk 1L",
            Money::from_pounds(45, 0),
            50,
            "Dairy",
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
        )
    }

    #[test]
    fn test_discount_rate() {
        let rate = DiscountRate::from_percent(15);
        assert_eq!(rate.bps(), 1500);
        assert_eq!(rate.to_string(), "15%");
        assert_eq!(DiscountRate::from_bps(825).to_string(), "8.25%");
    }

    #[test]
    fn test_cart_item_snapshot() {
        let item = CartItem::from_product(&milk(), 3);
        assert_eq!(item.category, "Dairy");
        assert_eq!(item.line_total(), Money::from_pounds(135, 0));
    }

    #[test]
    fn test_sale_id_format() {
        let id = SaleId::new(12);
        assert_eq!(id.to_string(), "S12");
        assert_eq!("S12".parse::<SaleId>().unwrap(), id);
        assert!("12".parse::<SaleId>().is_err());
        assert!("Sx".parse::<SaleId>().is_err());
    }

    #[test]
    fn test_cashier_id_display() {
        assert_eq!(CashierId::Regular(0).to_string(), "CASH1");
        assert_eq!(CashierId::SpecialNeeds.to_string(), "SPECIAL");
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("Visa".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!("cod".parse::<PaymentMethod>().unwrap(), PaymentMethod::CashOnDelivery);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }
}
