//! # Sales Ledger
//!
//! Append-only record of completed sales, owner of every `SaleRecord`.
//!
//! ```text
//! ┌──────────────┐   record()    ┌─────────────────────────────┐
//! │  checkout    │ ────────────► │ SalesLedger                 │
//! └──────────────┘               │  sales: [S1, S2, S4, ...]   │
//!                                │  next_seq: 5                │
//! ┌──────────────┐ remove_by_id()│                             │
//! │ cashier undo │ ────────────► │  ids are never reused       │
//! └──────────────┘               └─────────────────────────────┘
//! ```
//!
//! Cashier undo stacks hold `SaleId`s, not records: the ledger is the only
//! owner, and a stale id simply fails to resolve.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::money::Money;
use crate::types::{SaleId, SaleRecord};

/// How many products a sales report lists by default.
pub const DEFAULT_TOP_N: usize = 10;

/// Units sold of one product across all recorded sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductTally {
    pub barcode: String,
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
}

#[derive(Debug, Clone)]
pub struct SalesLedger {
    sales: Vec<SaleRecord>,
    next_seq: u64,
}

impl Default for SalesLedger {
    fn default() -> Self {
        SalesLedger {
            sales: Vec::new(),
            next_seq: 1,
        }
    }
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next sale id (`S1`, `S2`, ...).
    pub fn next_id(&mut self) -> SaleId {
        let id = SaleId::new(self.next_seq);
        self.next_seq += 1;
        id
    }

    pub fn record(&mut self, sale: SaleRecord) {
        self.sales.push(sale);
    }

    /// Removes and returns the sale with `id`, if it is still recorded.
    pub fn remove_by_id(&mut self, id: SaleId) -> Option<SaleRecord> {
        let pos = self.sales.iter().position(|s| s.id == id)?;
        Some(self.sales.remove(pos))
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Sales newest first.
    pub fn recent(&self) -> impl Iterator<Item = &SaleRecord> {
        self.sales.iter().rev()
    }

    /// Sum of all recorded totals.
    pub fn revenue(&self) -> Money {
        self.sales.iter().map(|s| s.total).sum()
    }

    /// Units sold per barcode, highest quantity first (ties by barcode).
    pub fn tally(&self) -> Vec<ProductTally> {
        let mut by_barcode: BTreeMap<&str, ProductTally> = BTreeMap::new();

        for line in self.sales.iter().flat_map(|s| s.lines.iter()) {
            let entry = by_barcode
                .entry(line.barcode.as_str())
                .or_insert_with(|| ProductTally {
                    barcode: line.barcode.clone(),
                    name: line.name.clone(),
                    quantity: 0,
                    revenue: Money::zero(),
                });
            entry.quantity += line.quantity;
            entry.revenue += line.line_total();
        }

        let mut tally: Vec<ProductTally> = by_barcode.into_values().collect();
        tally.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        tally
    }

    /// The `n` best-selling products.
    pub fn top(&self, n: usize) -> Vec<ProductTally> {
        let mut tally = self.tally();
        tally.truncate(n);
        tally
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CashierId, SaleLine};
    use chrono::Utc;

    fn line(barcode: &str, quantity: i64) -> SaleLine {
        SaleLine {
            barcode: barcode.to_string(),
            name: format!("Item {barcode}"),
            category: "Misc".to_string(),
            unit_price: Money::from_pounds(10, 0),
            quantity,
        }
    }

    fn sale(ledger: &mut SalesLedger, lines: Vec<SaleLine>) -> SaleId {
        let id = ledger.next_id();
        let subtotal: Money = lines.iter().map(SaleLine::line_total).sum();
        ledger.record(SaleRecord {
            id,
            customer_id: "C1".to_string(),
            online: false,
            cashier: CashierId::Regular(0),
            lines,
            subtotal,
            discount: Money::zero(),
            total: subtotal,
            coupon: None,
            created_at: Utc::now(),
        });
        id
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut ledger = SalesLedger::new();
        let s1 = sale(&mut ledger, vec![line("0001", 1)]);
        let s2 = sale(&mut ledger, vec![line("0002", 1)]);
        assert_eq!(s1.to_string(), "S1");
        assert_eq!(s2.to_string(), "S2");

        assert!(ledger.remove_by_id(s2).is_some());
        assert_eq!(ledger.next_id().to_string(), "S3");
    }

    #[test]
    fn test_remove_by_id() {
        let mut ledger = SalesLedger::new();
        let s1 = sale(&mut ledger, vec![line("0001", 1)]);
        let removed = ledger.remove_by_id(s1).unwrap();
        assert_eq!(removed.id, s1);
        assert!(ledger.is_empty());
        assert!(ledger.remove_by_id(s1).is_none());
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut ledger = SalesLedger::new();
        sale(&mut ledger, vec![line("0001", 1)]);
        sale(&mut ledger, vec![line("0002", 1)]);
        let ids: Vec<String> = ledger.recent().map(|s| s.id.to_string()).collect();
        assert_eq!(ids, ["S2", "S1"]);
    }

    #[test]
    fn test_tally_orders_by_quantity_then_barcode() {
        let mut ledger = SalesLedger::new();
        sale(&mut ledger, vec![line("0003", 2), line("0001", 1)]);
        sale(&mut ledger, vec![line("0001", 1), line("0002", 5)]);

        let tally = ledger.tally();
        let summary: Vec<(&str, i64)> = tally
            .iter()
            .map(|t| (t.barcode.as_str(), t.quantity))
            .collect();
        assert_eq!(summary, [("0002", 5), ("0001", 2), ("0003", 2)]);
        assert_eq!(tally[0].revenue, Money::from_pounds(50, 0));

        assert_eq!(ledger.top(1).len(), 1);
        assert_eq!(ledger.revenue(), Money::from_pounds(90, 0));
    }
}
