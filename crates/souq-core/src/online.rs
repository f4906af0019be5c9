//! # Online Order Queue
//!
//! Priority queue of pending online orders.
//!
//! ## Ordering
//! ```text
//! served first ◄──────────────────────────────────────────── served last
//!
//!   (priority 1, 09:00, #2)  (priority 5, 08:55, #1)  (priority 5, 09:10, #3)
//!
//! key = (priority ASC, placed_at ASC, arrival seq ASC)
//! ```
//!
//! `BinaryHeap` is a max-heap, so `Ord` on [`OnlineOrder`] is reversed: the
//! "greatest" order is the one that should be served next.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A pending online order. Consumed when processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnlineOrder {
    pub customer_id: String,
    /// Lower is served first.
    pub priority: u8,
    pub placed_at: DateTime<Utc>,
    #[serde(skip)]
    seq: u64,
}

impl Ord for OnlineOrder {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.placed_at.cmp(&self.placed_at))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OnlineOrder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Default)]
pub struct OnlineQueue {
    heap: BinaryHeap<OnlineOrder>,
    next_seq: u64,
}

impl OnlineQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places an order stamped with the current time.
    pub fn place(&mut self, customer_id: impl Into<String>, priority: u8) -> OnlineOrder {
        self.place_at(customer_id, priority, Utc::now())
    }

    /// Places an order with an explicit timestamp.
    pub fn place_at(
        &mut self,
        customer_id: impl Into<String>,
        priority: u8,
        placed_at: DateTime<Utc>,
    ) -> OnlineOrder {
        let order = OnlineOrder {
            customer_id: customer_id.into(),
            priority,
            placed_at,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push(order.clone());
        order
    }

    /// Removes and returns the order to serve next.
    pub fn pop(&mut self) -> Option<OnlineOrder> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pending orders in serving order.
    pub fn pending(&self) -> Vec<&OnlineOrder> {
        let mut orders: Vec<&OnlineOrder> = self.heap.iter().collect();
        orders.sort_by(|a, b| b.cmp(a));
        orders
    }
}
