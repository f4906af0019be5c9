//! # Order Routing
//!
//! Cashier queues, per-cashier undo stacks and walk-in assignment.
//!
//! ## Routing Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   walk-in ──► least-loaded regular cashier (lowest index on ties)      │
//! │                                                                         │
//! │                 CASH1 [C4, C7]   CASH2 []   CASH3 [C2]                  │
//! │                                    ▲                                    │
//! │                                    └── next walk-in goes here          │
//! │                                                                         │
//! │   special ──► SPECIAL, regardless of load                              │
//! │                                                                         │
//! │   online ──► OnlineQueue (see [`crate::online`])                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queues hold customer ids; undo stacks hold sale ids. The customer
//! registry and the sales ledger own the actual records.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{CashierId, SaleId};

// =============================================================================
// Cashier
// =============================================================================

#[derive(Debug, Clone)]
pub struct Cashier {
    id: CashierId,
    queue: VecDeque<String>,
    undo_stack: Vec<SaleId>,
}

impl Cashier {
    pub fn new(id: CashierId) -> Self {
        Cashier {
            id,
            queue: VecDeque::new(),
            undo_stack: Vec::new(),
        }
    }

    pub fn id(&self) -> CashierId {
        self.id
    }

    pub fn enqueue(&mut self, customer_id: impl Into<String>) {
        self.queue.push_back(customer_id.into());
    }

    /// Next customer in FIFO order.
    pub fn dequeue(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn queued(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    pub fn push_sale(&mut self, id: SaleId) {
        self.undo_stack.push(id);
    }

    /// Most recently pushed sale, LIFO.
    pub fn pop_sale(&mut self) -> Option<SaleId> {
        self.undo_stack.pop()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn status(&self) -> CashierStatus {
        CashierStatus {
            id: self.id,
            queue_len: self.queue.len(),
            queued: self.queue.iter().cloned().collect(),
            undo_depth: self.undo_stack.len(),
        }
    }
}

/// Read-only snapshot of one till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashierStatus {
    pub id: CashierId,
    pub queue_len: usize,
    pub queued: Vec<String>,
    pub undo_depth: usize,
}

// =============================================================================
// Cashier Pool
// =============================================================================

/// The regular cashiers plus the single special-needs cashier.
#[derive(Debug, Clone)]
pub struct CashierPool {
    regular: Vec<Cashier>,
    special: Cashier,
}

impl CashierPool {
    /// Creates `count` regular cashiers (`CASH1`..) and one `SPECIAL`.
    pub fn new(count: usize) -> Self {
        CashierPool {
            regular: (0..count)
                .map(|idx| Cashier::new(CashierId::Regular(idx)))
                .collect(),
            special: Cashier::new(CashierId::SpecialNeeds),
        }
    }

    /// Queues a walk-in at the regular cashier with the fewest waiting
    /// customers. Ties go to the lowest index.
    ///
    /// ## Errors
    /// - `CashierNotFound(0)` when the pool has no regular cashiers
    pub fn route_walk_in(&mut self, customer_id: impl Into<String>) -> CoreResult<CashierId> {
        let cashier = self
            .regular
            .iter_mut()
            .min_by_key(|c| c.queue_len())
            .ok_or(CoreError::CashierNotFound(0))?;

        cashier.enqueue(customer_id);
        Ok(cashier.id())
    }

    /// Queues a special-needs customer at the dedicated cashier.
    pub fn route_special(&mut self, customer_id: impl Into<String>) -> CashierId {
        self.special.enqueue(customer_id);
        self.special.id()
    }

    pub fn cashier(&self, id: CashierId) -> CoreResult<&Cashier> {
        match id {
            CashierId::Regular(idx) => self.regular.get(idx).ok_or(CoreError::CashierNotFound(idx)),
            CashierId::SpecialNeeds => Ok(&self.special),
        }
    }

    pub fn cashier_mut(&mut self, id: CashierId) -> CoreResult<&mut Cashier> {
        match id {
            CashierId::Regular(idx) => self
                .regular
                .get_mut(idx)
                .ok_or(CoreError::CashierNotFound(idx)),
            CashierId::SpecialNeeds => Ok(&mut self.special),
        }
    }

    /// Status of every till, regular cashiers first.
    pub fn status(&self) -> Vec<CashierStatus> {
        self.regular
            .iter()
            .chain(std::iter::once(&self.special))
            .map(Cashier::status)
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
