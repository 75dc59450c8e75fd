//! Per-session pending-order queues.
//!
//! Each session owns one FIFO queue per order side. Commit and cancel act
//! only on the head of the relevant queue; nothing ever reorders entries.
//! The decision to pop (and whether to commit or implicitly cancel on the
//! backend) belongs to the dispatcher — this module only provides the
//! queue discipline.

use std::collections::VecDeque;

use tradewire_types::{OrderIntent, OrderKind};

/// FIFO buy/sell intent queues for one user session.
#[derive(Debug, Default)]
pub struct PendingOrders {
    buys: VecDeque<OrderIntent>,
    sells: VecDeque<OrderIntent>,
}

impl PendingOrders {
    /// Create a pair of empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self, kind: OrderKind) -> &VecDeque<OrderIntent> {
        match kind {
            OrderKind::Buy => &self.buys,
            OrderKind::Sell => &self.sells,
        }
    }

    fn queue_mut(&mut self, kind: OrderKind) -> &mut VecDeque<OrderIntent> {
        match kind {
            OrderKind::Buy => &mut self.buys,
            OrderKind::Sell => &mut self.sells,
        }
    }

    /// Append an intent to the tail of its side's queue.
    pub fn enqueue(&mut self, intent: OrderIntent) {
        let kind = intent.kind;
        self.queue_mut(kind).push_back(intent);
    }

    /// Whether any intent of this side is pending. O(1).
    #[must_use]
    pub fn has_pending(&self, kind: OrderKind) -> bool {
        !self.queue(kind).is_empty()
    }

    /// The oldest pending intent of this side, if any.
    #[must_use]
    pub fn head(&self, kind: OrderKind) -> Option<&OrderIntent> {
        self.queue(kind).front()
    }

    /// Remove and return the oldest pending intent of this side.
    pub fn pop_head(&mut self, kind: OrderKind) -> Option<OrderIntent> {
        self.queue_mut(kind).pop_front()
    }

    /// Number of pending intents of this side.
    #[must_use]
    pub fn len(&self, kind: OrderKind) -> usize {
        self.queue(kind).len()
    }

    /// Whether both sides are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buys.is_empty() && self.sells.is_empty()
    }
}
