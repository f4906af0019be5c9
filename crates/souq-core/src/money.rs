//! # Money Module
//!
//! Provides the `Money` type for handling Egyptian pound amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With f64:                                                              │
//! │    70.99 × 3 = 212.96999999999997  ❌ WRONG!                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Piastres (1 LE = 100 piastres)                   │
//! │    7099 × 3 = 21297 piastres = LE 212.97                                │
//! │    Percentage discounts round ONCE, to the nearest piastre              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use souq_core::money::Money;
//! use souq_core::types::DiscountRate;
//!
//! let milk = Money::from_piastres(4500); // LE 45.00
//! let line = milk * 10;                  // LE 450.00
//! let after = line.apply_discount(DiscountRate::from_percent(5));
//! assert_eq!(after.piastres(), 42750);   // LE 427.50
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::DiscountRate;

/// Currency symbol used by `Display`.
pub const CURRENCY_SYMBOL: &str = "LE";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in piastres (the smallest unit of the Egyptian pound).
///
/// ## Design Decisions
/// - **i64 (signed)**: discount amounts and reversals can be expressed directly
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Ord**: products can be sorted by price without float comparisons
///
/// ```text
/// Product.price ──► CartItem.unit_price ──► CartItem.line_total
///                                                 │
///                         Cart.subtotal ◄─────────┘
///                              │
///                 coupon ► customer discount ► bulk discount
///                              │
///                      SaleRecord.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from piastres.
    ///
    /// ```rust
    /// use souq_core::money::Money;
    ///
    /// let price = Money::from_piastres(17050); // LE 170.50
    /// assert_eq!(price.piastres(), 17050);
    /// ```
    #[inline]
    pub const fn from_piastres(piastres: i64) -> Self {
        Money(piastres)
    }

    /// Creates a Money value from pounds and piastres.
    ///
    /// For negative amounts only the pound part carries the sign:
    /// `from_pounds(-5, 50)` is -LE 5.50.
    ///
    /// ```rust
    /// use souq_core::money::Money;
    ///
    /// assert_eq!(Money::from_pounds(45, 0).piastres(), 4500);
    /// assert_eq!(Money::from_pounds(-5, 50).piastres(), -550);
    /// ```
    #[inline]
    pub const fn from_pounds(pounds: i64, piastres: i64) -> Self {
        if pounds < 0 {
            Money(pounds * 100 - piastres)
        } else {
            Money(pounds * 100 + piastres)
        }
    }

    /// Returns the value in piastres.
    #[inline]
    pub const fn piastres(&self) -> i64 {
        self.0
    }

    /// Returns the whole-pound portion (truncated toward zero).
    #[inline]
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the piastre portion (always 0-99).
    #[inline]
    pub const fn piastres_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ```rust
    /// use souq_core::money::Money;
    ///
    /// let unit = Money::from_piastres(7099);
    /// assert_eq!(unit.multiply_quantity(3).piastres(), 21297);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// The amount a percentage discount takes off, rounded half-up to the
    /// nearest piastre.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`, widened to i128.
    ///
    /// ```rust
    /// use souq_core::money::Money;
    /// use souq_core::types::DiscountRate;
    ///
    /// let bill = Money::from_piastres(120_000); // LE 1200.00
    /// let off = bill.discount_amount(DiscountRate::from_percent(5));
    /// assert_eq!(off.piastres(), 6000);          // LE 60.00
    /// ```
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        let amount = self.0 as i128 * rate.bps() as i128;
        let rounded = if amount >= 0 {
            (amount + 5000) / 10000
        } else {
            (amount - 5000) / 10000
        };
        Money(rounded as i64)
    }

    /// Returns the amount left after taking a percentage off.
    #[inline]
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        *self - self.discount_amount(rate)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `LE 427.50` (or `-LE 5.50`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{} {}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.pounds().abs(),
            self.piastres_part()
        )
    }
}

/// Parses operator input such as `45`, `45.5`, `70.99` or `-3.25`.
///
/// More than two fractional digits is rejected rather than silently rounded.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("expected a number like 45.50"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a number like 45.50"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let pounds: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount too large"))?
        };
        let piastres: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("bad fraction"))? * 10,
            _ => frac.parse().map_err(|_| invalid("bad fraction"))?,
        };

        let total = pounds
            .checked_mul(100)
            .and_then(|p| p.checked_add(piastres))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -total } else { total }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_piastres() {
        let money = Money::from_piastres(1099);
        assert_eq!(money.piastres(), 1099);
        assert_eq!(money.pounds(), 10);
        assert_eq!(money.piastres_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_piastres(42750).to_string(), "LE 427.50");
        assert_eq!(Money::from_piastres(500).to_string(), "LE 5.00");
        assert_eq!(Money::from_piastres(-550).to_string(), "-LE 5.50");
        assert_eq!(Money::zero().to_string(), "LE 0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("45".parse::<Money>().unwrap().piastres(), 4500);
        assert_eq!("45.5".parse::<Money>().unwrap().piastres(), 4550);
        assert_eq!("70.99".parse::<Money>().unwrap().piastres(), 7099);
        assert_eq!(".5".parse::<Money>().unwrap().piastres(), 50);
        assert_eq!("-3.25".parse::<Money>().unwrap().piastres(), -325);

        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_piastres(1000);
        let b = Money::from_piastres(500);

        assert_eq!((a + b).piastres(), 1500);
        assert_eq!((a - b).piastres(), 500);
        assert_eq!((a * 3).piastres(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.piastres(), 2000);
    }

    #[test]
    fn test_discounts_from_checkout_scenarios() {
        let bill = Money::from_pounds(1200, 0);

        let bulk = bill.apply_discount(DiscountRate::from_percent(5));
        assert_eq!(bulk, Money::from_pounds(1140, 0));

        let special = bill.apply_discount(DiscountRate::from_percent(10));
        assert_eq!(special, Money::from_pounds(1080, 0));
        let both = special.apply_discount(DiscountRate::from_percent(5));
        assert_eq!(both, Money::from_pounds(1026, 0));
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // LE 0.10 at 5% = 0.5 piastre → 1 piastre
        let amount = Money::from_piastres(10);
        assert_eq!(amount.discount_amount(DiscountRate::from_percent(5)).piastres(), 1);
        assert_eq!(amount.apply_discount(DiscountRate::from_percent(5)).piastres(), 9);
    }
}
