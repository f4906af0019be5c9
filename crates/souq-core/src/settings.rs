//! # Store Settings
//!
//! Tunable store policy. Parsing from files and environment lives in the
//! console app; this crate only defines the shape, the defaults and the
//! validation rules.
//!
//! ```toml
//! [store]
//! cashier_count = 3
//! online_cashier = 0             # CASH1 holds online sales for undo
//! special_discount_bps = 1000    # 10%
//! bulk_threshold_piastres = 100000  # LE 1000.00
//! bulk_discount_bps = 500        # 5%
//! default_online_priority = 5
//! seed_catalog = true
//! ```

use serde::{Deserialize, Serialize};

use crate::checkout::PricingPolicy;
use crate::money::Money;
use crate::types::DiscountRate;
use crate::validation::{validate_discount_bps, validate_priority, ValidationResult};
use crate::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Number of regular cashiers (`CASH1`..`CASHn`).
    #[serde(default = "default_cashier_count")]
    pub cashier_count: usize,

    /// Regular cashier (zero-based) whose undo stack receives online sales.
    #[serde(default)]
    pub online_cashier: usize,

    /// Personal discount for special-needs customers.
    #[serde(default = "default_special_discount")]
    pub special_discount_bps: u32,

    /// Bills at or above this amount get the bulk discount.
    #[serde(default = "default_bulk_threshold")]
    pub bulk_threshold_piastres: i64,

    #[serde(default = "default_bulk_discount")]
    pub bulk_discount_bps: u32,

    /// Priority given to online customers who don't declare one.
    #[serde(default = "default_online_priority")]
    pub default_online_priority: u8,

    /// Load the built-in product catalog at startup.
    #[serde(default = "default_true")]
    pub seed_catalog: bool,
}

fn default_cashier_count() -> usize {
    3
}

fn default_special_discount() -> u32 {
    1000
}

fn default_bulk_threshold() -> i64 {
    100_000
}

fn default_bulk_discount() -> u32 {
    500
}

fn default_online_priority() -> u8 {
    5
}

fn default_true() -> bool {
    true
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            cashier_count: default_cashier_count(),
            online_cashier: 0,
            special_discount_bps: default_special_discount(),
            bulk_threshold_piastres: default_bulk_threshold(),
            bulk_discount_bps: default_bulk_discount(),
            default_online_priority: default_online_priority(),
            seed_catalog: true,
        }
    }
}

impl StoreSettings {
    /// Validates the settings.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.cashier_count == 0 {
            return Err(ValidationError::OutOfRange {
                field: "cashier_count".to_string(),
                min: 1,
                max: i64::MAX,
            });
        }

        if self.online_cashier >= self.cashier_count {
            return Err(ValidationError::OutOfRange {
                field: "online_cashier".to_string(),
                min: 0,
                max: self.cashier_count as i64 - 1,
            });
        }

        validate_discount_bps("special_discount_bps", self.special_discount_bps)?;
        validate_discount_bps("bulk_discount_bps", self.bulk_discount_bps)?;

        if self.bulk_threshold_piastres < 0 {
            return Err(ValidationError::OutOfRange {
                field: "bulk_threshold_piastres".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        validate_priority(self.default_online_priority)?;

        Ok(())
    }

    pub fn special_discount(&self) -> DiscountRate {
        DiscountRate::from_bps(self.special_discount_bps)
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy {
            bulk_threshold: Money::from_piastres(self.bulk_threshold_piastres),
            bulk_discount: DiscountRate::from_bps(self.bulk_discount_bps),
        }
    }
}
