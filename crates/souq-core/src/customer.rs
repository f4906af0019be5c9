//! # Customers
//!
//! A customer is a shared core record (id, name, cart) plus a
//! variant-specific profile. Routing and discounts match on the profile.
//!
//! ```text
//! Customer { id, name, cart, profile }
//!                               │
//!            ┌──────────────────┼───────────────────────────┐
//!            ▼                  ▼                           ▼
//!         WalkIn     Online { address, payment,     Special { discount }
//!                             priority }
//!            │                  │                           │
//!     least-loaded CASHn    OnlineQueue                 SPECIAL till
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::types::{DiscountRate, PaymentMethod};

/// Variant-specific customer data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CustomerProfile {
    WalkIn,
    Online {
        address: String,
        payment_method: PaymentMethod,
        /// 1 (served first) through 10.
        priority: u8,
    },
    Special {
        /// Personal discount taken off the post-coupon total.
        discount: DiscountRate,
    },
}

impl CustomerProfile {
    pub fn kind(&self) -> CustomerKind {
        match self {
            CustomerProfile::WalkIn => CustomerKind::WalkIn,
            CustomerProfile::Online { .. } => CustomerKind::Online,
            CustomerProfile::Special { .. } => CustomerKind::Special,
        }
    }
}

/// The bare variant tag, for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerKind {
    WalkIn,
    Online,
    Special,
}

impl fmt::Display for CustomerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerKind::WalkIn => write!(f, "WalkIn"),
            CustomerKind::Online => write!(f, "Online"),
            CustomerKind::Special => write!(f, "Special"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub cart: Cart,
    pub profile: CustomerProfile,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, profile: CustomerProfile) -> Self {
        Customer {
            id: id.into(),
            name: name.into(),
            cart: Cart::new(),
            profile,
        }
    }

    pub fn kind(&self) -> CustomerKind {
        self.profile.kind()
    }

    pub fn summary(&self) -> CustomerSummary {
        CustomerSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            profile: self.profile.clone(),
            cart_lines: self.cart.items().count(),
        }
    }
}

/// Row of the customer report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub id: String,
    pub name: String,
    pub profile: CustomerProfile,
    pub cart_lines: usize,
}

// =============================================================================
// Registry
// =============================================================================

/// Every registered customer, keyed by id. Lives as long as the store;
/// customers are never removed.
#[derive(Debug, Clone, Default)]
pub struct CustomerRegistry {
    customers: BTreeMap<String, Customer>,
}

impl CustomerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Errors
    /// - `DuplicateCustomer` if the id is taken (the existing customer is kept)
    pub fn register(&mut self, customer: Customer) -> CoreResult<()> {
        if self.customers.contains_key(&customer.id) {
            return Err(CoreError::DuplicateCustomer(customer.id));
        }
        debug!(id = %customer.id, kind = %customer.kind(), "Customer registered");
        self.customers.insert(customer.id.clone(), customer);
        Ok(())
    }

    pub fn get(&self, id: &str) -> CoreResult<&Customer> {
        self.customers
            .get(id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> CoreResult<&mut Customer> {
        self.customers
            .get_mut(id)
            .ok_or_else(|| CoreError::CustomerNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Customers ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }
}
