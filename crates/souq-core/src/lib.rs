//! # souq-core: Pure Business Logic for Souq POS
//!
//! This crate is the **heart** of Souq POS: inventory, carts with undo,
//! cashier queues, checkout pricing and the sales ledger. No I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Souq POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 souq-console (apps/souq-console)                │   │
//! │  │   config ──► command shell ──► tables / JSON reports            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Supermarket API                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ souq-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │ inventory │  │   cart    │  │ checkout  │  │  ledger   │   │   │
//! │  │   │  stock    │  │ undo log  │  │ discounts │  │ S1, S2..  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │  routing  │  │  online   │  │ customer  │  │  coupon   │   │   │
//! │  │   │ CASHn     │  │ priority  │  │ registry  │  │ catalog   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   store::Supermarket owns all of the above                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, SaleRecord, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules for operator input
//! - [`inventory`] - Barcode-keyed stock with non-negative adjustment
//! - [`cart`] - Shopping cart, action log and undo
//! - [`coupon`] - Fixed coupon catalog
//! - [`checkout`] - Discount pipeline, receipts, reversals
//! - [`ledger`] - Sales ledger and tallies
//! - [`routing`] - Cashiers, queues and undo stacks
//! - [`online`] - Online order priority queue
//! - [`customer`] - Customer variants and registry
//! - [`settings`] - Store policy knobs
//! - [`catalog`] - Opening stock
//! - [`store`] - The `Supermarket` context
//!
//! ## Design Principles
//!
//! 1. **Single owner**: the `Supermarket` owns all state; queues and undo
//!    stacks refer to customers and sales by id
//! 2. **No I/O**: stdin, files and config parsing live in the console app
//! 3. **Integer Money**: all monetary values are piastres (i64)
//! 4. **Explicit Errors**: failures are typed and leave state unchanged
//!
//! ## Example Usage
//!
//! ```rust
//! use souq_core::{CashierId, Money, StoreSettings, Supermarket};
//!
//! let mut store = Supermarket::new(StoreSettings::default()).unwrap();
//! store.register_walk_in("C1", "Mona").unwrap();
//! store.add_to_cart("C1", "0001", 10).unwrap(); // 10 × Milk 1L @ LE 45
//! store.enqueue("C1").unwrap();
//!
//! let receipt = store.checkout(CashierId::Regular(0), Some("SAVE5")).unwrap();
//! assert_eq!(receipt.pricing.total, Money::from_piastres(42750));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod coupon;
pub mod customer;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod online;
pub mod routing;
pub mod settings;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use souq_core::Money` instead of
// `use souq_core::money::Money`

pub use cart::{Cart, CartUndo};
pub use checkout::{CheckoutReceipt, CouponOutcome, PriceBreakdown, PricingPolicy, SaleReversal};
pub use customer::{Customer, CustomerKind, CustomerProfile};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use settings::StoreSettings;
pub use store::{AbandonedCart, CartChange, CartView, Supermarket};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Most urgent online order priority.
pub const MIN_ONLINE_PRIORITY: u8 = 1;

/// Least urgent online order priority.
pub const MAX_ONLINE_PRIORITY: u8 = 10;

/// Highest unit price a product may carry: LE 1,000,000.00.
pub const MAX_PRICE_PIASTRES: i64 = 100_000_000;

/// Most units of one product the store can hold.
///
/// Together with [`MAX_PRICE_PIASTRES`] this caps a single cart line at
/// LE 1,000,000,000,000.00, far inside `i64` piastres.
pub const MAX_STOCK: i64 = 1_000_000;
