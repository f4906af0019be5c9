//! # Coupons
//!
//! The fixed coupon catalog. Codes match case-sensitively: `SAVE5` is valid,
//! `save5` is not.
//!
//! | Code          | Discount |
//! |---------------|----------|
//! | `LOVEEGYPT`   | 10%      |
//! | `SAVE5`       | 5%       |
//! | `OFFER20`     | 20%      |
//! | `BLACKFRIDAY` | 15%      |

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::DiscountRate;

/// A discount code and the percentage it takes off the cart subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub rate: DiscountRate,
}

/// Every code the store accepts.
pub const COUPON_CATALOG: &[(&str, u32)] = &[
    ("LOVEEGYPT", 10),
    ("SAVE5", 5),
    ("OFFER20", 20),
    ("BLACKFRIDAY", 15),
];

/// Looks a code up in the catalog.
///
/// ```rust
/// use souq_core::coupon::lookup;
///
/// assert_eq!(lookup("SAVE5").unwrap().rate.bps(), 500);
/// assert!(lookup("save5").is_err());
/// ```
pub fn lookup(code: &str) -> CoreResult<Coupon> {
    catalog()
        .find(|coupon| coupon.code == code)
        .ok_or_else(|| CoreError::InvalidCoupon(code.to_string()))
}

/// Every accepted coupon, in catalog order.
pub fn catalog() -> impl Iterator<Item = Coupon> {
    COUPON_CATALOG.iter().map(|(code, pct)| Coupon {
        code: (*code).to_string(),
        rate: DiscountRate::from_percent(*pct),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rates() {
        assert_eq!(lookup("LOVEEGYPT").unwrap().rate, DiscountRate::from_percent(10));
        assert_eq!(lookup("OFFER20").unwrap().rate, DiscountRate::from_percent(20));
        assert_eq!(lookup("BLACKFRIDAY").unwrap().rate, DiscountRate::from_percent(15));
    }

    #[test]
    fn test_catalog_listing() {
        let codes: Vec<String> = catalog().map(|c| c.code).collect();
        assert_eq!(codes, ["LOVEEGYPT", "SAVE5", "OFFER20", "BLACKFRIDAY"]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(
            lookup("LoveEgypt"),
            Err(CoreError::InvalidCoupon("LoveEgypt".to_string()))
        );
        assert!(lookup(" SAVE5").is_err());
        assert!(lookup("").is_err());
    }
}
