//! # Shell Commands
//!
//! One command per input line, parsed with clap and dispatched to the
//! `Supermarket`.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Line → Report                                   │
//! │                                                                         │
//! │  add-item C1 0001 10                                                   │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  split_line()   ──► ["add-item", "C1", "0001", "10"]                   │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ShellLine::try_parse_from  ──► ShellCommand::AddItem { .. }           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  execute() ──► store.add_to_cart("C1", "0001", 10)                     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Report::CartChanged { .. }  ──► report::render()                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Arguments with spaces are double-quoted:
//! `add-online O1 "Nour Adel" "12 Tahrir St, Cairo" card --priority 2`

use std::str::FromStr;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use souq_core::coupon;
use souq_core::ledger::DEFAULT_TOP_N;
use souq_core::validation;
use souq_core::{CashierId, CoreError, Money, PaymentMethod, Product, Supermarket};

use crate::error::{ConsoleError, ConsoleResult};
use crate::report::Report;

// =============================================================================
// Grammar
// =============================================================================

/// A single shell line.
#[derive(Debug, Parser)]
#[command(
    name = "souq",
    no_binary_name = true,
    disable_help_subcommand = true,
    about = "Souq POS shell. One command per line; quote arguments with spaces."
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// List the inventory
    Products {
        #[arg(long, value_enum, default_value_t = ProductOrder::Barcode)]
        by: ProductOrder,
    },

    /// Register a product: barcode name price stock expiry(YYYY-MM-DD) category
    AddProduct {
        barcode: String,
        name: String,
        price: Money,
        #[arg(allow_negative_numbers = true)]
        stock: i64,
        expiry: String,
        category: String,
    },

    /// Register a walk-in (or, with --special, a special-needs) customer
    AddCustomer {
        id: String,
        name: String,
        #[arg(long)]
        special: bool,
    },

    /// Register an online customer: id name address payment(cash|card|cod)
    AddOnline {
        id: String,
        name: String,
        address: String,
        payment: PaymentMethod,
        /// 1 (served first) to 10
        #[arg(long)]
        priority: Option<u8>,
    },

    /// List registered customers
    Customers,

    /// Put units of a product in a customer's cart
    AddItem {
        customer: String,
        barcode: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Take units out of a customer's cart
    RemoveItem {
        customer: String,
        barcode: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Reverse the last add/remove on a customer's cart
    UndoCart { customer: String },

    /// Show a customer's cart
    Cart { customer: String },

    /// Abandon a customer's cart, putting everything back on the shelf
    ClearCart { customer: String },

    /// List the accepted coupon codes
    Coupons,

    /// Send a customer to a till
    Enqueue { customer: String },

    /// Queue an online customer's order
    PlaceOrder { customer: String },

    /// Serve the next customer at a till (1, CASH2, special, online)
    Checkout {
        till: Till,
        #[arg(long)]
        coupon: Option<String>,
    },

    /// Reverse the last bill at a till (1, CASH2, special, online)
    UndoSale { till: Till },

    /// Show till queues and pending online orders
    Cashiers,

    /// Show the sales ledger and best sellers
    Sales {
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
    },

    /// Show this help
    Help,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductOrder {
    Barcode,
    Price,
    Category,
}

/// A till named on the command line.
///
/// Cashier numbers are 1-based like their `CASHn` labels; `online` means
/// the online queue for `checkout` and the online cashier for `undo-sale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Till {
    /// Zero-based regular cashier index.
    Cashier(usize),
    Special,
    Online,
}

impl FromStr for Till {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "special" | "special-needs" => Ok(Till::Special),
            "online" => Ok(Till::Online),
            other => {
                let digits = other.strip_prefix("cash").unwrap_or(other);
                match digits.parse::<usize>() {
                    Ok(n) if n >= 1 => Ok(Till::Cashier(n - 1)),
                    _ => Err(format!(
                        "expected a cashier number (1, CASH2), 'special' or 'online', got '{s}'"
                    )),
                }
            }
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Splits a line on whitespace, keeping double-quoted runs together.
///
/// `""` yields an empty argument.
pub fn split_line(line: &str) -> ConsoleResult<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(ConsoleError::UnbalancedQuotes(line.trim().to_string()));
    }
    if in_token {
        args.push(current);
    }

    Ok(args)
}

/// Parses a line into a command. Blank lines and `#` comments give `None`.
pub fn parse_line(line: &str) -> ConsoleResult<Option<ShellCommand>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let args = split_line(trimmed)?;
    let parsed = ShellLine::try_parse_from(args)?;
    Ok(Some(parsed.command))
}

/// Full command list, as printed by `help`.
pub fn help_text() -> String {
    ShellLine::command().render_long_help().to_string()
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs a command against the store.
///
/// Failures leave the store unchanged; the shell reports them and carries on.
pub fn execute(store: &mut Supermarket, command: ShellCommand) -> ConsoleResult<Report> {
    let report = match command {
        ShellCommand::Products { by } => {
            let inventory = store.inventory();
            let products: Vec<Product> = match by {
                ProductOrder::Barcode => inventory.products().cloned().collect(),
                ProductOrder::Price => inventory.by_price().into_iter().cloned().collect(),
                ProductOrder::Category => inventory.by_category().into_iter().cloned().collect(),
            };
            Report::Products { order: by, products }
        }

        ShellCommand::AddProduct {
            barcode,
            name,
            price,
            stock,
            expiry,
            category,
        } => {
            let expiry = validation::parse_expiry(&expiry).map_err(CoreError::from)?;
            let product = Product::new(
                barcode.trim(),
                name.trim(),
                price,
                stock,
                category.trim(),
                expiry,
            );
            store.add_product(product.clone())?;
            Report::ProductAdded(product)
        }

        ShellCommand::AddCustomer { id, name, special } => {
            if special {
                store.register_special(&id, &name)?;
            } else {
                store.register_walk_in(&id, &name)?;
            }
            Report::CustomerAdded(store.customer(id.trim())?.summary())
        }

        ShellCommand::AddOnline {
            id,
            name,
            address,
            payment,
            priority,
        } => {
            store.register_online(&id, &name, &address, payment, priority)?;
            Report::CustomerAdded(store.customer(id.trim())?.summary())
        }

        ShellCommand::Customers => Report::Customers(
            store.customers().iter().map(|c| c.summary()).collect(),
        ),

        ShellCommand::AddItem {
            customer,
            barcode,
            quantity,
        } => Report::CartChanged {
            removed: false,
            change: store.add_to_cart(&customer, &barcode, quantity)?,
        },

        ShellCommand::RemoveItem {
            customer,
            barcode,
            quantity,
        } => Report::CartChanged {
            removed: true,
            change: store.remove_from_cart(&customer, &barcode, quantity)?,
        },

        ShellCommand::UndoCart { customer } => {
            let undo = store.undo_cart(&customer)?;
            Report::CartUndone {
                customer_id: customer,
                undo,
            }
        }

        ShellCommand::Cart { customer } => Report::Cart(store.cart(&customer)?),

        ShellCommand::ClearCart { customer } => {
            Report::CartAbandoned(store.abandon_cart(&customer)?)
        }

        ShellCommand::Coupons => Report::Coupons(coupon::catalog().collect()),

        ShellCommand::Enqueue { customer } => {
            let cashier = store.enqueue(&customer)?;
            Report::Queued {
                customer_id: customer,
                cashier,
            }
        }

        ShellCommand::PlaceOrder { customer } => {
            Report::OrderPlaced(store.place_online_order(&customer)?)
        }

        ShellCommand::Checkout { till, coupon } => {
            let coupon = coupon.as_deref();
            let receipt = match till {
                Till::Online => store.checkout_online(coupon)?,
                Till::Cashier(idx) => store.checkout(CashierId::Regular(idx), coupon)?,
                Till::Special => store.checkout(CashierId::SpecialNeeds, coupon)?,
            };
            Report::Receipt(receipt)
        }

        ShellCommand::UndoSale { till } => {
            let cashier = match till {
                Till::Online => CashierId::Regular(store.settings().online_cashier),
                Till::Cashier(idx) => CashierId::Regular(idx),
                Till::Special => CashierId::SpecialNeeds,
            };
            Report::Reversal(store.undo_sale(cashier)?)
        }

        ShellCommand::Cashiers => Report::Cashiers {
            tills: store.cashier_status(),
            online: store.online_queue().pending().into_iter().cloned().collect(),
        },

        ShellCommand::Sales { top } => Report::Sales {
            sales: store.ledger().recent().cloned().collect(),
            revenue: store.ledger().revenue(),
            top: store.top_products(top),
        },

        ShellCommand::Help => Report::Help(help_text()),

        ShellCommand::Exit => Report::Goodbye,
    };

    Ok(report)
}
