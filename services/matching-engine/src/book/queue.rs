//! Price level queue with FIFO time priority
//!
//! A queue represents every order resting at one exact price. Orders are
//! kept in strict insertion order (oldest first = highest time priority).
//!
//! The queue stores order ids only; order snapshots live once, in the
//! book's id index. This keeps a size update a single-location change:
//! replace the index entry, adjust the level's running volume.

use std::collections::VecDeque;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

/// FIFO of the orders resting at one price level.
///
/// Invariant: `volume` equals the sum of the members' remaining sizes at
/// every observation point. Empty queues are dropped by the owning side.
#[derive(Debug, Clone)]
pub struct OrderQueue {
    price: Price,
    orders: VecDeque<OrderId>,
    volume: Quantity,
}

impl OrderQueue {
    /// Create a new empty queue for a price level.
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            volume: Quantity::zero(),
        }
    }

    /// Insert at the tail (lowest time priority).
    pub fn append(&mut self, order: &Order) {
        debug_assert_eq!(order.price, self.price, "order belongs to another level");
        self.orders.push_back(order.id.clone());
        self.volume = self.volume + order.quantity;
    }

    /// The oldest member, without removing it.
    pub fn head(&self) -> Option<&OrderId> {
        self.orders.front()
    }

    /// Replace a member snapshot in place.
    ///
    /// The member keeps its queue position: only the running volume moves,
    /// by the size delta. A partially filled order therefore keeps its
    /// time priority.
    ///
    /// Returns false, with the volume untouched, if the order is not in
    /// this queue.
    pub fn update(&mut self, old: &Order, new: &Order) -> bool {
        debug_assert_eq!(old.id, new.id, "update must preserve identity");
        if !self.orders.contains(&old.id) {
            return false;
        }
        self.volume = Quantity::try_new(
            self.volume.as_decimal() - old.quantity.as_decimal() + new.quantity.as_decimal(),
        )
        .unwrap_or_else(Quantity::zero);
        true
    }

    /// Remove a member by identity (not necessarily the head).
    ///
    /// Returns false if the order is not in this queue.
    pub fn remove(&mut self, order: &Order) -> bool {
        let Some(position) = self.orders.iter().position(|id| *id == order.id) else {
            return false;
        };
        let _ = self.orders.remove(position);
        self.volume = self.volume.saturating_sub(order.quantity);
        true
    }

    /// The price of this level.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Total remaining size resting at this level.
    pub fn volume(&self) -> Quantity {
        self.volume
    }

    /// Number of orders at this level.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Member ids in time-priority order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &OrderId> {
        self.orders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::order::Side;

    fn order(id: &str, quantity: u64) -> Order {
        Order::new(
            OrderId::new(id),
            Side::SELL,
            Quantity::from_u64(quantity),
            Price::from_u64(100),
            1_000 + quantity as i64,
        )
    }

    #[test]
    fn test_append_accumulates_volume() {
        let mut queue = OrderQueue::new(Price::from_u64(100));
        queue.append(&order("a", 3));
        queue.append(&order("b", 7));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.volume(), Quantity::from_u64(10));
        assert_eq!(queue.head(), Some(&OrderId::new("a")));
    }

    #[test]
    fn test_fifo_order_is_insertion_order() {
        let mut queue = OrderQueue::new(Price::from_u64(100));
        queue.append(&order("a", 1));
        queue.append(&order("b", 1));
        queue.append(&order("c", 1));

        let ids: Vec<&str> = queue.iter().map(OrderId::as_str).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_update_preserves_position_and_adjusts_volume() {
        let mut queue = OrderQueue::new(Price::from_u64(100));
        let a = order("a", 5);
        queue.append(&a);
        queue.append(&order("b", 5));

        let reduced = a.with_quantity(Quantity::from_u64(2));
        assert!(queue.update(&a, &reduced));

        // still at the front, volume reflects the delta
        assert_eq!(queue.head(), Some(&OrderId::new("a")));
        assert_eq!(queue.volume(), Quantity::from_u64(7));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_update_unknown_member_leaves_volume_untouched() {
        let mut queue = OrderQueue::new(Price::from_u64(100));
        queue.append(&order("a", 3));

        let stranger = order("zzz", 5);
        let reduced = stranger.with_quantity(Quantity::from_u64(1));
        assert!(!queue.update(&stranger, &reduced));
        assert_eq!(queue.volume(), Quantity::from_u64(3));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_remove_non_head_member() {
        let mut queue = OrderQueue::new(Price::from_u64(100));
        queue.append(&order("a", 3));
        let b = order("b", 4);
        queue.append(&b);
        queue.append(&order("c", 5));

        assert!(queue.remove(&b));
        let ids: Vec<&str> = queue.iter().map(OrderId::as_str).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(queue.volume(), Quantity::from_u64(8));
    }

    #[test]
    fn test_remove_unknown_member() {
        let mut queue = OrderQueue::new(Price::from_u64(100));
        queue.append(&order("a", 3));

        assert!(!queue.remove(&order("zzz", 3)));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.volume(), Quantity::from_u64(3));
    }
}
