//! # Supermarket
//!
//! The top-level context that owns every piece of store state and runs the
//! cart, checkout and undo flows across them.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Supermarket                                                            │
//! │                                                                         │
//! │   inventory ◄──────── stock deltas ────────┐                            │
//! │                                            │                            │
//! │   customers ── Customer.cart ──────────────┤  add / remove / undo       │
//! │        ▲                                   │                            │
//! │        │ ids                               │                            │
//! │   cashiers ── queue (customer ids)         │                            │
//! │            └─ undo stack (sale ids) ──┐    │                            │
//! │   online  ── OnlineQueue (ids)        │    │                            │
//! │                                       ▼    │                            │
//! │   ledger  ── SaleRecord (owner) ───────────┘  cashier undo restocks     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation either completes or returns an error with state left as
//! it was. The one exception is checkout: the customer is dequeued before
//! the empty-cart check and is not put back.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cart::CartUndo;
use crate::catalog::{self, SeedSummary};
use crate::checkout::{CheckoutReceipt, CouponOutcome, PricingPolicy, SaleReversal};
use crate::coupon::Coupon;
use crate::customer::{Customer, CustomerProfile, CustomerRegistry};
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::ledger::{ProductTally, SalesLedger};
use crate::money::Money;
use crate::online::{OnlineOrder, OnlineQueue};
use crate::routing::{CashierPool, CashierStatus};
use crate::settings::StoreSettings;
use crate::types::{CartItem, CashierId, PaymentMethod, Product, SaleLine, SaleRecord};
use crate::validation;

/// Name used for the online queue in `EmptyQueue` errors.
pub const ONLINE_QUEUE_NAME: &str = "online queue";

// =============================================================================
// Views
// =============================================================================

/// Result of an add-to-cart or remove-from-cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartChange {
    pub customer_id: String,
    pub barcode: String,
    pub name: String,
    /// Units added, or units actually removed (may be 0).
    pub quantity: i64,
    /// Shelf stock after the change.
    pub stock_left: i64,
}

/// Read-only snapshot of a customer's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub customer_id: String,
    pub items: Vec<CartItem>,
    pub subtotal: Money,
    pub coupon: Option<Coupon>,
    /// Subtotal after the coupon; customer and bulk discounts apply at the till.
    pub total: Money,
    pub history_len: usize,
}

/// Result of abandoning a cart: what went back on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbandonedCart {
    pub customer_id: String,
    pub restocked: Vec<CartItem>,
}

// =============================================================================
// Supermarket
// =============================================================================

#[derive(Debug, Clone)]
pub struct Supermarket {
    settings: StoreSettings,
    pricing: PricingPolicy,
    inventory: Inventory,
    customers: CustomerRegistry,
    cashiers: CashierPool,
    online: OnlineQueue,
    ledger: SalesLedger,
}

impl Supermarket {
    /// Opens the store: validates settings, creates the tills and seeds the
    /// catalog when enabled.
    pub fn new(settings: StoreSettings) -> CoreResult<Self> {
        settings.validate()?;

        let mut store = Supermarket {
            pricing: settings.pricing_policy(),
            inventory: Inventory::new(),
            customers: CustomerRegistry::new(),
            cashiers: CashierPool::new(settings.cashier_count),
            online: OnlineQueue::new(),
            ledger: SalesLedger::new(),
            settings,
        };

        if store.settings.seed_catalog {
            let summary = store.seed_catalog();
            info!(
                inserted = summary.inserted,
                rejected = summary.rejected,
                "Catalog seeded"
            );
        }

        info!(cashiers = store.settings.cashier_count, "Store opened");
        Ok(store)
    }

    /// Loads the built-in catalog into the inventory.
    pub fn seed_catalog(&mut self) -> SeedSummary {
        catalog::seed(&mut self.inventory)
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Registers a new product after validating its fields.
    ///
    /// ## Errors
    /// - `Validation` for empty/oversized text, negative price or stock
    /// - `DuplicateProduct` if the barcode exists
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        validation::validate_barcode(&product.barcode)?;
        validation::validate_name(&product.name)?;
        validation::validate_category(&product.category)?;
        validation::validate_price(product.price)?;
        validation::validate_stock(product.stock())?;

        let barcode = product.barcode.clone();
        self.inventory.add(product)?;
        info!(%barcode, "Product registered");
        Ok(())
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    // =========================================================================
    // Customers
    // =========================================================================

    pub fn register_walk_in(&mut self, id: &str, name: &str) -> CoreResult<()> {
        self.register(id, name, CustomerProfile::WalkIn)
    }

    /// Registers a special-needs customer with the store's personal rate.
    pub fn register_special(&mut self, id: &str, name: &str) -> CoreResult<()> {
        let discount = self.settings.special_discount();
        self.register(id, name, CustomerProfile::Special { discount })
    }

    /// Registers an online customer. `priority` falls back to the store
    /// default when not given.
    pub fn register_online(
        &mut self,
        id: &str,
        name: &str,
        address: &str,
        payment_method: PaymentMethod,
        priority: Option<u8>,
    ) -> CoreResult<()> {
        let priority = priority.unwrap_or(self.settings.default_online_priority);
        validation::validate_priority(priority)?;
        validation::validate_address(address)?;

        self.register(
            id,
            name,
            CustomerProfile::Online {
                address: address.trim().to_string(),
                payment_method,
                priority,
            },
        )
    }

    fn register(&mut self, id: &str, name: &str, profile: CustomerProfile) -> CoreResult<()> {
        validation::validate_customer_id(id)?;
        validation::validate_name(name)?;
        self.customers
            .register(Customer::new(id.trim(), name.trim(), profile))
    }

    pub fn customer(&self, id: &str) -> CoreResult<&Customer> {
        self.customers.get(id)
    }

    pub fn customers(&self) -> &CustomerRegistry {
        &self.customers
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Takes `quantity` units off the shelf and puts them in the cart.
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity <= 0`
    /// - `CustomerNotFound` / `ProductNotFound`
    /// - `InsufficientStock` if the shelf holds fewer units
    pub fn add_to_cart(
        &mut self,
        customer_id: &str,
        barcode: &str,
        quantity: i64,
    ) -> CoreResult<CartChange> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }

        let customer = self.customers.get_mut(customer_id)?;
        let stock_left = self.inventory.adjust_stock(barcode, -quantity)?;
        let product = self
            .inventory
            .get(barcode)
            .ok_or_else(|| CoreError::ProductNotFound(barcode.to_string()))?;

        customer.cart.add_item(product, quantity)?;
        debug!(customer = customer_id, barcode, quantity, stock_left, "Added to cart");

        Ok(CartChange {
            customer_id: customer.id.clone(),
            barcode: barcode.to_string(),
            name: product.name.clone(),
            quantity,
            stock_left,
        })
    }

    /// Takes up to `quantity` units out of the cart and back on the shelf.
    ///
    /// Removing more than the cart holds is not an error: the returned
    /// `quantity` is what actually moved.
    pub fn remove_from_cart(
        &mut self,
        customer_id: &str,
        barcode: &str,
        quantity: i64,
    ) -> CoreResult<CartChange> {
        let customer = self.customers.get_mut(customer_id)?;
        let name = customer
            .cart
            .item(barcode)
            .map(|item| item.name.clone())
            .or_else(|| self.inventory.get(barcode).map(|p| p.name.clone()))
            .unwrap_or_else(|| barcode.to_string());

        let removed = customer.cart.remove_item(barcode, quantity)?;
        let stock_left = if removed > 0 {
            self.inventory.adjust_stock(barcode, removed)?
        } else {
            self.inventory.get(barcode).map(Product::stock).unwrap_or(0)
        };
        debug!(customer = customer_id, barcode, removed, stock_left, "Removed from cart");

        Ok(CartChange {
            customer_id: customer.id.clone(),
            barcode: barcode.to_string(),
            name,
            quantity: removed,
            stock_left,
        })
    }

    /// Reverses the customer's last cart action.
    pub fn undo_cart(&mut self, customer_id: &str) -> CoreResult<CartUndo> {
        let customer = self.customers.get_mut(customer_id)?;
        let undone = customer.cart.undo(&mut self.inventory)?;
        info!(customer = customer_id, ?undone, "Cart action undone");
        Ok(undone)
    }

    /// Empties the customer's cart, putting every unit back on the shelf.
    ///
    /// The action log and any coupon go with it, so the abandoned cart
    /// cannot be undone.
    pub fn abandon_cart(&mut self, customer_id: &str) -> CoreResult<AbandonedCart> {
        let customer = self.customers.get_mut(customer_id)?;
        let restocked: Vec<CartItem> = customer.cart.items().cloned().collect();

        for item in &restocked {
            if let Err(e) = self.inventory.adjust_stock(&item.barcode, item.quantity) {
                warn!(
                    customer = customer_id,
                    barcode = %item.barcode,
                    error = %e,
                    "Restock failed"
                );
            }
        }
        customer.cart.clear();

        info!(customer = customer_id, lines = restocked.len(), "Cart abandoned");
        Ok(AbandonedCart {
            customer_id: customer.id.clone(),
            restocked,
        })
    }

    pub fn cart(&self, customer_id: &str) -> CoreResult<CartView> {
        let customer = self.customers.get(customer_id)?;
        let cart = &customer.cart;

        Ok(CartView {
            customer_id: customer.id.clone(),
            items: cart.items().cloned().collect(),
            subtotal: cart.subtotal(),
            coupon: cart.coupon().cloned(),
            total: cart.total(),
            history_len: cart.history_len(),
        })
    }

    pub fn cart_history_len(&self, customer_id: &str) -> CoreResult<usize> {
        Ok(self.customers.get(customer_id)?.cart.history_len())
    }

    // =========================================================================
    // Routing
    // =========================================================================

    /// Sends a customer to a till: special-needs customers to `SPECIAL`,
    /// everyone else to the least-loaded regular cashier.
    pub fn enqueue(&mut self, customer_id: &str) -> CoreResult<CashierId> {
        let customer = self.customers.get(customer_id)?;

        let cashier = match customer.profile {
            CustomerProfile::Special { .. } => self.cashiers.route_special(customer.id.clone()),
            CustomerProfile::WalkIn | CustomerProfile::Online { .. } => {
                self.cashiers.route_walk_in(customer.id.clone())?
            }
        };

        info!(customer = customer_id, %cashier, "Customer queued");
        Ok(cashier)
    }

    /// Puts an online customer's order in the priority queue.
    pub fn place_online_order(&mut self, customer_id: &str) -> CoreResult<OnlineOrder> {
        let customer = self.customers.get(customer_id)?;

        match customer.profile {
            CustomerProfile::Online { priority, .. } => {
                let order = self.online.place(customer.id.clone(), priority);
                info!(customer = customer_id, priority, "Online order placed");
                Ok(order)
            }
            CustomerProfile::WalkIn | CustomerProfile::Special { .. } => {
                Err(CoreError::NotOnlineCustomer(customer_id.to_string()))
            }
        }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Serves the next customer in `cashier`'s queue.
    ///
    /// ## Errors
    /// - `CashierNotFound` for an unknown regular index
    /// - `EmptyQueue` when nobody is waiting
    /// - `EmptyCart` when the dequeued customer has nothing to buy (the
    ///   customer stays out of the queue)
    pub fn checkout(
        &mut self,
        cashier: CashierId,
        coupon: Option<&str>,
    ) -> CoreResult<CheckoutReceipt> {
        let customer_id = self
            .cashiers
            .cashier_mut(cashier)?
            .dequeue()
            .ok_or_else(|| CoreError::EmptyQueue(cashier.to_string()))?;

        self.complete_sale(customer_id, cashier, false, coupon)
    }

    /// Serves the highest-priority online order. The sale lands on the
    /// configured online cashier's undo stack.
    pub fn checkout_online(&mut self, coupon: Option<&str>) -> CoreResult<CheckoutReceipt> {
        let cashier = CashierId::Regular(self.settings.online_cashier);
        self.cashiers.cashier(cashier)?;

        let order = self
            .online
            .pop()
            .ok_or_else(|| CoreError::EmptyQueue(ONLINE_QUEUE_NAME.to_string()))?;

        self.complete_sale(order.customer_id, cashier, true, coupon)
    }

    fn complete_sale(
        &mut self,
        customer_id: String,
        cashier: CashierId,
        online: bool,
        coupon: Option<&str>,
    ) -> CoreResult<CheckoutReceipt> {
        let customer = self.customers.get_mut(&customer_id)?;
        if customer.cart.is_empty() {
            warn!(customer = %customer_id, %cashier, "Checkout skipped: empty cart");
            return Err(CoreError::EmptyCart(customer_id));
        }

        let coupon = match coupon.map(str::trim).filter(|code| !code.is_empty()) {
            None => CouponOutcome::NotOffered,
            Some(code) => match customer.cart.apply_coupon(code) {
                Ok(applied) => CouponOutcome::Applied {
                    code: applied.code.clone(),
                },
                Err(CoreError::CouponAlreadyApplied(existing)) => {
                    CouponOutcome::AlreadyApplied { code: existing }
                }
                Err(e) => {
                    warn!(customer = %customer_id, code, error = %e, "Coupon rejected at checkout");
                    CouponOutcome::Rejected {
                        code: code.to_string(),
                        reason: e.to_string(),
                    }
                }
            },
        };

        let pricing = self.pricing.price(&customer.cart, &customer.profile);
        let coupon_code = customer.cart.coupon().map(|c| c.code.clone());
        let lines: Vec<SaleLine> = customer
            .cart
            .finalize()
            .into_iter()
            .map(SaleLine::from)
            .collect();

        let sale_id = self.ledger.next_id();
        self.ledger.record(SaleRecord {
            id: sale_id,
            customer_id: customer_id.clone(),
            online,
            cashier,
            lines: lines.clone(),
            subtotal: pricing.subtotal,
            discount: pricing.discount(),
            total: pricing.total,
            coupon: coupon_code,
            created_at: chrono::Utc::now(),
        });
        self.cashiers.cashier_mut(cashier)?.push_sale(sale_id);

        info!(
            sale = %sale_id,
            customer = %customer_id,
            %cashier,
            online,
            total = %pricing.total,
            "Checkout complete"
        );

        Ok(CheckoutReceipt {
            sale_id,
            customer_name: customer.name.clone(),
            customer_id,
            cashier,
            online,
            lines,
            pricing,
            coupon,
        })
    }

    /// Reverses `cashier`'s most recent sale: restocks every line and drops
    /// the record from the ledger. The customer's cart is not restored.
    ///
    /// A sale id the ledger no longer knows is logged and reported with
    /// `found_in_ledger: false`; it is not an error.
    pub fn undo_sale(&mut self, cashier: CashierId) -> CoreResult<SaleReversal> {
        let sale_id = self
            .cashiers
            .cashier_mut(cashier)?
            .pop_sale()
            .ok_or_else(|| CoreError::NoSalesToUndo(cashier.to_string()))?;

        let Some(record) = self.ledger.remove_by_id(sale_id) else {
            warn!(sale = %sale_id, %cashier, "Sale on undo stack missing from ledger");
            return Ok(SaleReversal {
                sale_id,
                cashier,
                restocked: Vec::new(),
                found_in_ledger: false,
            });
        };

        for line in &record.lines {
            if let Err(e) = self.inventory.adjust_stock(&line.barcode, line.quantity) {
                warn!(sale = %sale_id, barcode = %line.barcode, error = %e, "Restock failed");
            }
        }

        info!(sale = %sale_id, %cashier, lines = record.lines.len(), "Sale reversed");
        Ok(SaleReversal {
            sale_id,
            cashier,
            restocked: record.lines,
            found_in_ledger: true,
        })
    }

    // =========================================================================
    // Reports
    // =========================================================================

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        self.pricing
    }

    pub fn cashier_status(&self) -> Vec<CashierStatus> {
        self.cashiers.status()
    }

    pub fn online_queue(&self) -> &OnlineQueue {
        &self.online
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    pub fn top_products(&self, n: usize) -> Vec<ProductTally> {
        self.ledger.top(n)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
