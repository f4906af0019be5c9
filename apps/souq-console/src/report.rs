//! # Reports
//!
//! What a command produced, and how it is shown: rounded tables for people,
//! JSON for scripts.
//!
//! ```text
//! ╭─────────┬─────────┬──────────┬───────────┬───────╮
//! │ Barcode │ Name    │ Category │     Price │ Stock │
//! ├─────────┼─────────┼──────────┼───────────┼───────┤
//! │ 0001    │ Milk 1L │ Dairy    │  LE 45.00 │    50 │
//! │ 0002    │ Bread   │ Bakery   │   LE 2.00 │   100 │
//! ╰─────────┴─────────┴──────────┴───────────┴───────╯
//! ```

use serde::Serialize;
use souq_core::coupon::Coupon;
use souq_core::customer::CustomerSummary;
use souq_core::ledger::ProductTally;
use souq_core::online::OnlineOrder;
use souq_core::routing::CashierStatus;
use souq_core::{
    AbandonedCart, CartChange, CartUndo, CartView, CashierId, CheckoutReceipt, CouponOutcome,
    CustomerProfile, Money, Product, SaleLine, SaleRecord, SaleReversal,
};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{object::Columns, Alignment, Style, Theme},
};

use crate::commands::ProductOrder;
use crate::config::DisplaySettings;
use crate::error::{ConsoleError, ConsoleResult, ErrorCode};

// =============================================================================
// Report
// =============================================================================

/// The outcome of one shell command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Report {
    Products {
        order: ProductOrder,
        products: Vec<Product>,
    },
    ProductAdded(Product),
    CustomerAdded(CustomerSummary),
    Customers(Vec<CustomerSummary>),
    CartChanged {
        removed: bool,
        change: CartChange,
    },
    CartUndone {
        customer_id: String,
        undo: CartUndo,
    },
    Cart(CartView),
    CartAbandoned(AbandonedCart),
    Coupons(Vec<Coupon>),
    Queued {
        customer_id: String,
        cashier: CashierId,
    },
    OrderPlaced(OnlineOrder),
    Receipt(CheckoutReceipt),
    Reversal(SaleReversal),
    Cashiers {
        tills: Vec<CashierStatus>,
        online: Vec<OnlineOrder>,
    },
    Sales {
        sales: Vec<SaleRecord>,
        revenue: Money,
        top: Vec<ProductTally>,
    },
    Help(String),
    Goodbye,
}

impl Report {
    /// True when the shell should stop reading input.
    pub fn is_exit(&self) -> bool {
        matches!(self, Report::Goodbye)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: ErrorCode,
    message: &'a str,
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders a report as text or JSON, per the display settings.
pub fn render(report: &Report, display: &DisplaySettings) -> ConsoleResult<String> {
    if display.json {
        return Ok(serde_json::to_string_pretty(report)?);
    }
    Ok(TextRenderer::new(&display.currency_symbol).render(report))
}

/// Renders a failed command as a status line.
pub fn render_error(err: &ConsoleError, display: &DisplaySettings) -> String {
    let message = err.to_string();
    if display.json {
        let body = ErrorBody {
            error: ErrorDetail {
                code: err.code(),
                message: &message,
            },
        };
        return serde_json::to_string(&body).unwrap_or_else(|_| format!("error: {message}"));
    }

    match err {
        // clap already prefixes its messages
        ConsoleError::Usage(_) => message,
        _ => format!("error: {message}"),
    }
}

/// Formats an amount with the configured currency symbol.
pub fn format_money(amount: Money, symbol: &str) -> String {
    let piastres = amount.piastres();
    let sign = if piastres < 0 { "-" } else { "" };
    format!(
        "{sign}{symbol} {}.{:02}",
        (piastres / 100).abs(),
        (piastres % 100).abs()
    )
}

struct TextRenderer<'a> {
    symbol: &'a str,
}

impl<'a> TextRenderer<'a> {
    fn new(symbol: &'a str) -> Self {
        TextRenderer { symbol }
    }

    fn money(&self, amount: Money) -> String {
        format_money(amount, self.symbol)
    }

    fn render(&self, report: &Report) -> String {
        match report {
            Report::Products { products, .. } => self.products(products),
            Report::ProductAdded(p) => format!(
                "Added product {} ({}) at {}, stock {}",
                p.barcode,
                p.name,
                self.money(p.price),
                p.stock()
            ),
            Report::CustomerAdded(c) => {
                format!("Registered {} customer {} ({})", c.profile.kind(), c.id, c.name)
            }
            Report::Customers(customers) => self.customers(customers),
            Report::CartChanged { removed, change } => cart_change(*removed, change),
            Report::CartUndone { customer_id, undo } => match undo {
                CartUndo::Add { barcode, restored } => format!(
                    "Undid add on {customer_id}'s cart: {restored} x {barcode} back on the shelf"
                ),
                CartUndo::Remove { barcode, returned } => format!(
                    "Undid remove on {customer_id}'s cart: {returned} x {barcode} back in the cart"
                ),
            },
            Report::Cart(view) => self.cart(view),
            Report::CartAbandoned(abandoned) => abandoned_cart(abandoned),
            Report::Coupons(coupons) => coupon_list(coupons),
            Report::Queued {
                customer_id,
                cashier,
            } => format!("{customer_id} is queued at {cashier}"),
            Report::OrderPlaced(order) => format!(
                "Online order placed for {} (priority {})",
                order.customer_id, order.priority
            ),
            Report::Receipt(receipt) => self.receipt(receipt),
            Report::Reversal(reversal) => self.reversal(reversal),
            Report::Cashiers { tills, online } => self.cashiers(tills, online),
            Report::Sales {
                sales,
                revenue,
                top,
            } => self.sales(sales, *revenue, top),
            Report::Help(text) => text.trim_end().to_string(),
            Report::Goodbye => "Goodbye.".to_string(),
        }
    }

    fn products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return "No products.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["Barcode", "Name", "Category", "Price", "Stock", "Expiry"]);
        for p in products {
            builder.push_record([
                p.barcode.clone(),
                p.name.clone(),
                p.category.clone(),
                self.money(p.price),
                p.stock().to_string(),
                p.expiry.to_string(),
            ]);
        }

        format!(
            "{}\n{} products",
            table(builder, 3..5),
            products.len()
        )
    }

    fn customers(&self, customers: &[CustomerSummary]) -> String {
        if customers.is_empty() {
            return "No customers.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Type", "Details", "Cart lines"]);
        for c in customers {
            let details = match &c.profile {
                CustomerProfile::WalkIn => "-".to_string(),
                CustomerProfile::Online {
                    address,
                    payment_method,
                    priority,
                } => format!("{address}; {payment_method}; priority {priority}"),
                CustomerProfile::Special { discount } => format!("{discount} discount"),
            };
            builder.push_record([
                c.id.clone(),
                c.name.clone(),
                c.profile.kind().to_string(),
                details,
                c.cart_lines.to_string(),
            ]);
        }

        table(builder, 4..5)
    }

    fn cart(&self, view: &CartView) -> String {
        let mut out = Vec::new();

        if view.items.is_empty() {
            out.push(format!("{}'s cart is empty", view.customer_id));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Barcode", "Name", "Qty", "Unit price", "Line total"]);
            for item in &view.items {
                builder.push_record([
                    item.barcode.clone(),
                    item.name.clone(),
                    item.quantity.to_string(),
                    self.money(item.unit_price),
                    self.money(item.line_total()),
                ]);
            }
            out.push(format!("Cart for {}", view.customer_id));
            out.push(table(builder, 2..5));
            out.push(format!("Subtotal: {}", self.money(view.subtotal)));
        }

        if let Some(coupon) = &view.coupon {
            out.push(format!(
                "Coupon {} ({}): -{}",
                coupon.code,
                coupon.rate,
                self.money(view.subtotal - view.total)
            ));
        }
        if !view.items.is_empty() {
            out.push(format!("Total: {}", self.money(view.total)));
        }
        out.push(format!("Undo history: {} action(s)", view.history_len));

        out.join("\n")
    }

    fn receipt(&self, receipt: &CheckoutReceipt) -> String {
        let channel = if receipt.online { " (online)" } else { "" };
        let mut out = vec![format!(
            "Sale {} at {}{}: {} ({})",
            receipt.sale_id, receipt.cashier, channel, receipt.customer_name, receipt.customer_id
        )];

        out.push(self.lines_table(&receipt.lines));

        match &receipt.coupon {
            CouponOutcome::NotOffered => {}
            CouponOutcome::Applied { code } => out.push(format!("Coupon {code} applied")),
            CouponOutcome::AlreadyApplied { code } => out.push(format!(
                "Cart already carried coupon {code}; the offered code was ignored"
            )),
            CouponOutcome::Rejected { code, reason } => {
                out.push(format!("Coupon {code} rejected: {reason}"))
            }
        }

        let pricing = &receipt.pricing;
        out.push(format!("Subtotal:          {}", self.money(pricing.subtotal)));
        for (label, amount) in [
            ("Coupon discount:  ", pricing.coupon_discount),
            ("Customer discount:", pricing.customer_discount),
            ("Bulk discount:    ", pricing.bulk_discount),
        ] {
            if !amount.is_zero() {
                out.push(format!("{label} -{}", self.money(amount)));
            }
        }
        out.push(format!("Total:             {}", self.money(pricing.total)));

        out.join("\n")
    }

    fn reversal(&self, reversal: &SaleReversal) -> String {
        if !reversal.found_in_ledger {
            return format!(
                "Sale {} popped from {} was not in the ledger; nothing restocked",
                reversal.sale_id, reversal.cashier
            );
        }

        format!(
            "Reversed sale {} at {}; restocked:\n{}",
            reversal.sale_id,
            reversal.cashier,
            self.lines_table(&reversal.restocked)
        )
    }

    fn lines_table(&self, lines: &[SaleLine]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Barcode", "Name", "Qty", "Unit price", "Line total"]);
        for line in lines {
            builder.push_record([
                line.barcode.clone(),
                line.name.clone(),
                line.quantity.to_string(),
                self.money(line.unit_price),
                self.money(line.line_total()),
            ]);
        }
        table(builder, 2..5)
    }

    fn cashiers(&self, tills: &[CashierStatus], online: &[OnlineOrder]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Till", "Queue", "Waiting", "Bills"]);
        for till in tills {
            let waiting = if till.queued.is_empty() {
                "-".to_string()
            } else {
                till.queued.join(", ")
            };
            builder.push_record([
                till.id.to_string(),
                till.queue_len.to_string(),
                waiting,
                till.undo_depth.to_string(),
            ]);
        }

        let mut out = vec![table(builder, 1..2)];
        out.push(format!("Online orders pending: {}", online.len()));

        if !online.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["#", "Customer", "Priority", "Placed"]);
            for (idx, order) in online.iter().enumerate() {
                builder.push_record([
                    (idx + 1).to_string(),
                    order.customer_id.clone(),
                    order.priority.to_string(),
                    order.placed_at.format("%H:%M:%S").to_string(),
                ]);
            }
            out.push(table(builder, 2..3));
        }

        out.join("\n")
    }

    fn sales(&self, sales: &[SaleRecord], revenue: Money, top: &[ProductTally]) -> String {
        if sales.is_empty() {
            return "No sales yet.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record([
            "Sale", "Customer", "Channel", "Till", "Items", "Subtotal", "Discount", "Total", "Time",
        ]);
        for sale in sales {
            builder.push_record([
                sale.id.to_string(),
                sale.customer_id.clone(),
                if sale.online { "online" } else { "in-store" }.to_string(),
                sale.cashier.to_string(),
                sale.total_quantity().to_string(),
                self.money(sale.subtotal),
                self.money(sale.discount),
                self.money(sale.total),
                sale.created_at.format("%H:%M:%S").to_string(),
            ]);
        }

        let mut out = vec![table(builder, 4..8)];
        out.push(format!("Revenue: {}", self.money(revenue)));

        if !top.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["#", "Barcode", "Name", "Sold", "Revenue"]);
            for (rank, tally) in top.iter().enumerate() {
                builder.push_record([
                    (rank + 1).to_string(),
                    tally.barcode.clone(),
                    tally.name.clone(),
                    tally.quantity.to_string(),
                    self.money(tally.revenue),
                ]);
            }
            out.push("Best sellers:".to_string());
            out.push(table(builder, 3..5));
        }

        out.join("\n")
    }
}

fn cart_change(removed: bool, change: &CartChange) -> String {
    let CartChange {
        customer_id,
        barcode,
        name,
        quantity,
        stock_left,
    } = change;

    if !removed {
        format!("Added {quantity} x {name} to {customer_id}'s cart (stock left: {stock_left})")
    } else if *quantity == 0 {
        format!("{barcode} is not in {customer_id}'s cart; nothing removed")
    } else {
        format!("Removed {quantity} x {name} from {customer_id}'s cart (stock left: {stock_left})")
    }
}

/// Builds a rounded table with a rule under the header row and the given
/// columns right-aligned.
fn abandoned_cart(abandoned: &AbandonedCart) -> String {
    if abandoned.restocked.is_empty() {
        return format!("{}'s cart was already empty", abandoned.customer_id);
    }

    let mut builder = Builder::default();
    builder.push_record(["Barcode", "Name", "Qty"]);
    for item in &abandoned.restocked {
        builder.push_record([
            item.barcode.clone(),
            item.name.clone(),
            item.quantity.to_string(),
        ]);
    }

    format!(
        "Cleared {}'s cart; back on the shelf:\n{}",
        abandoned.customer_id,
        table(builder, 2..3)
    )
}

fn coupon_list(coupons: &[Coupon]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Code", "Discount"]);
    for coupon in coupons {
        builder.push_record([coupon.code.clone(), coupon.rate.to_string()]);
    }

    format!(
        "{}\nOne coupon per cart; codes are case-sensitive.",
        table(builder, 1..2)
    )
}

fn table(builder: Builder, numeric: std::ops::Range<usize>) -> String {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Columns::new(numeric), Alignment::right());
    table.to_string()
}
