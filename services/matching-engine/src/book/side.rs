//! One market direction of the book
//!
//! Owns every price level for bids or for asks, keyed by price in a
//! `BTreeMap` for deterministic sorted iteration. The aggressive end is
//! the highest price for bids and the lowest for asks; `best_queue` plus
//! repeated `worse_than` calls walk the side best-to-worst.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::queue::OrderQueue;

/// All price levels of one market direction.
///
/// Invariant: a price key exists in the map iff its queue is non-empty.
#[derive(Debug, Clone)]
pub struct OrderSide {
    side: Side,
    levels: BTreeMap<Price, OrderQueue>,
    num_orders: usize,
}

impl OrderSide {
    /// Create an empty side for one direction.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            num_orders: 0,
        }
    }

    /// The direction this side holds.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Insert into the level for the order's price, creating it if absent.
    pub fn append(&mut self, order: &Order) {
        self.levels
            .entry(order.price)
            .or_insert_with(|| OrderQueue::new(order.price))
            .append(order);
        self.num_orders += 1;
    }

    /// Remove the order from its level, dropping the level if emptied.
    ///
    /// Returns false if the order is not resting on this side.
    pub fn remove(&mut self, order: &Order) -> bool {
        let Some(queue) = self.levels.get_mut(&order.price) else {
            return false;
        };
        if !queue.remove(order) {
            return false;
        }
        self.num_orders -= 1;
        if queue.is_empty() {
            self.levels.remove(&order.price);
        }
        true
    }

    /// Apply a size and/or price change.
    ///
    /// A price change removes the order from its old level and appends the
    /// replacement to the new one, forfeiting time priority. A
    /// size-only change updates the queue in place, preserving position.
    ///
    /// Returns false if `old` is not resting on this side.
    pub fn update(&mut self, old: &Order, new: &Order) -> bool {
        if old.price == new.price {
            let Some(queue) = self.levels.get_mut(&old.price) else {
                return false;
            };
            queue.update(old, new)
        } else {
            if !self.remove(old) {
                return false;
            }
            self.append(new);
            true
        }
    }

    /// The queue at the most aggressive price, or None if the side is empty.
    pub fn best_queue(&self) -> Option<&OrderQueue> {
        match self.side {
            Side::BUY => self.levels.values().next_back(),
            Side::SELL => self.levels.values().next(),
        }
    }

    /// The most aggressive price on this side.
    pub fn best_price(&self) -> Option<Price> {
        match self.side {
            Side::BUY => self.levels.keys().next_back().copied(),
            Side::SELL => self.levels.keys().next().copied(),
        }
    }

    /// The queue at the next price strictly worse than `price`
    /// (lower for bids, higher for asks).
    pub fn worse_than(&self, price: Price) -> Option<&OrderQueue> {
        match self.side {
            Side::BUY => self.levels.range(..price).next_back().map(|(_, q)| q),
            Side::SELL => self
                .levels
                .range((Excluded(price), Unbounded))
                .next()
                .map(|(_, q)| q),
        }
    }

    /// The queue at an exact price level.
    pub fn queue_at(&self, price: Price) -> Option<&OrderQueue> {
        self.levels.get(&price)
    }

    /// Total number of orders resting on this side.
    pub fn len(&self) -> usize {
        self.num_orders
    }

    pub fn is_empty(&self) -> bool {
        self.num_orders == 0
    }

    /// Number of non-empty price levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// `(price, volume)` pairs from best to worst.
    pub fn depth(&self) -> Vec<(Price, Quantity)> {
        let mut levels = Vec::with_capacity(self.levels.len());
        let mut cursor = self.best_queue();
        while let Some(queue) = cursor {
            levels.push((queue.price(), queue.volume()));
            cursor = self.worse_than(queue.price());
        }
        levels
    }
}
