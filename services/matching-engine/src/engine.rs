//! Order book core
//!
//! Owns both sides and the id index, and coordinates every operation:
//! market/limit intake, the shared level-drain routine, cancellation,
//! modification, and the read-only queries (depth, market-price
//! estimation, fill predicate).
//!
//! Invariant: every id in the index maps to exactly the snapshot resting
//! in that id's one owning queue on its side; an id absent from the index
//! is absent from both sides. Validation always completes before the
//! first mutation, so a returned error means an untouched book.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use types::errors::OrderError;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderType, Side, TimeInForce};

use crate::book::OrderSide;
use crate::crossing;
use crate::report::{Depth, ExecutionReport, MarketPriceEstimate};

/// Requested changes for [`OrderBook::modify`].
///
/// `side` must name the order's current side; omitted fields are left
/// unchanged.
#[derive(Debug, Clone)]
pub struct OrderPatch {
    pub side: Side,
    pub price: Option<Price>,
    pub quantity: Option<Quantity>,
}

/// A central limit order book with price-time priority matching.
///
/// Single-writer by design: no operation suspends or blocks, and one call
/// may touch the id index plus one or two price levels. Callers running
/// concurrently must treat every public operation as one indivisible
/// critical section (one lock per book, or one dedicated intake thread).
#[derive(Debug, Clone)]
pub struct OrderBook {
    /// Id index: the single source of truth for order snapshots.
    orders: HashMap<OrderId, Order>,
    bids: OrderSide,
    asks: OrderSide,
}

/// Accumulates fills across the levels one intake call drains.
struct FillSession {
    done: Vec<Order>,
    partial: Option<Order>,
    partial_quantity_processed: Quantity,
    /// Σ maker price × consumed size, for the taker's volume-weighted
    /// average price.
    notional: Decimal,
}

impl FillSession {
    fn new() -> Self {
        Self {
            done: Vec::new(),
            partial: None,
            partial_quantity_processed: Quantity::zero(),
            notional: Decimal::ZERO,
        }
    }

    fn into_report(self, quantity_left: Quantity) -> ExecutionReport {
        ExecutionReport {
            done: self.done,
            partial: self.partial,
            partial_quantity_processed: self.partial_quantity_processed,
            quantity_left,
        }
    }
}

impl OrderBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self {
            orders: HashMap::new(),
            bids: OrderSide::new(Side::BUY),
            asks: OrderSide::new(Side::SELL),
        }
    }

    fn side(&self, side: Side) -> &OrderSide {
        match side {
            Side::BUY => &self.bids,
            Side::SELL => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut OrderSide {
        match side {
            Side::BUY => &mut self.bids,
            Side::SELL => &mut self.asks,
        }
    }

    /// Submit an order described by its type tag.
    ///
    /// Market orders ignore `price` and `tif`. Limit orders require
    /// `price`; a missing `id` gets a generated one.
    pub fn create_order(
        &mut self,
        order_type: OrderType,
        side: Side,
        quantity: Quantity,
        price: Option<Price>,
        id: Option<OrderId>,
        tif: TimeInForce,
    ) -> Result<ExecutionReport, OrderError> {
        match order_type {
            OrderType::Market => self.market(side, quantity),
            OrderType::Limit => {
                let price = price.ok_or(OrderError::InvalidPrice)?;
                let id = id.unwrap_or_else(OrderId::generate);
                self.limit(side, id, quantity, price, tif)
            }
        }
    }

    /// Execute a market order against the opposing side.
    ///
    /// Drains best-to-worst until the quantity is exhausted or the side
    /// empties. A market order never rests: unfilled demand is reported
    /// in `quantity_left` with no book mutation for it.
    pub fn market(&mut self, side: Side, quantity: Quantity) -> Result<ExecutionReport, OrderError> {
        if !quantity.is_positive() {
            return Err(OrderError::InsufficientQuantity);
        }

        let opposing = side.opposite();
        let mut session = FillSession::new();
        let mut quantity_left = quantity;

        while quantity_left.is_positive() {
            let Some(best) = self.side(opposing).best_price() else {
                break;
            };
            quantity_left = self.drain_level(opposing, best, quantity_left, &mut session);
        }

        debug!(
            %side,
            %quantity,
            fills = session.done.len(),
            %quantity_left,
            "market order processed"
        );
        Ok(session.into_report(quantity_left))
    }

    /// Execute a limit order, resting any unfilled remainder.
    ///
    /// Validations (duplicate id, quantity, price, then the FOK liquidity
    /// pre-check) all run before the first mutation. The matching
    /// loop drains opposing levels only while their price is acceptable
    /// relative to the limit.
    pub fn limit(
        &mut self,
        side: Side,
        id: OrderId,
        quantity: Quantity,
        price: Price,
        tif: TimeInForce,
    ) -> Result<ExecutionReport, OrderError> {
        if self.orders.contains_key(&id) {
            return Err(OrderError::OrderExists);
        }
        if !quantity.is_positive() {
            return Err(OrderError::InvalidQuantity);
        }
        if !price.is_positive() {
            return Err(OrderError::InvalidPrice);
        }
        // FOK is atomic via check-then-commit: prove the full quantity is
        // fillable before touching anything.
        if tif == TimeInForce::FOK && !self.can_fill_order(side, quantity, price) {
            return Err(OrderError::LimitFokNotFillable);
        }

        let opposing = side.opposite();
        let mut session = FillSession::new();
        let mut quantity_left = quantity;

        while quantity_left.is_positive() {
            let Some(best) = self.side(opposing).best_price() else {
                break;
            };
            if !crossing::acceptable(side, price, best) {
                break;
            }
            quantity_left = self.drain_level(opposing, best, quantity_left, &mut session);
        }

        let report = if quantity_left.is_positive() {
            // rest the remainder on the order's own side
            let resting = Order::new(id.clone(), side, quantity_left, price, now_nanos());
            self.side_mut(side).append(&resting);
            self.orders.insert(id.clone(), resting.clone());

            let mut report = session.into_report(quantity_left);
            if quantity_left < quantity {
                report.partial = Some(resting);
                report.partial_quantity_processed = quantity.saturating_sub(quantity_left);
            }
            if tif == TimeInForce::IOC {
                // IOC never rests
                self.cancel(&id);
            }
            report
        } else {
            // fully matched: synthesize the taker entry at the
            // volume-weighted average of its fills
            let vwap = Price::rounded(session.notional / quantity.as_decimal());
            let taker = Order::new(id, side, quantity, vwap, now_nanos());
            let mut report = session.into_report(Quantity::zero());
            report.done.push(taker);
            report
        };

        debug!(
            %side,
            %quantity,
            %price,
            ?tif,
            fills = report.done.len(),
            quantity_left = %report.quantity_left,
            "limit order processed"
        );
        Ok(report)
    }

    /// Drain the level at `price` on `opposing` for up to `quantity`.
    ///
    /// Fully consumed makers move to `session.done`; a maker larger than
    /// the remaining quantity is replaced in place (keeping its queue
    /// position) and recorded as the session's partial. Returns the
    /// quantity still unfilled.
    fn drain_level(
        &mut self,
        opposing: Side,
        price: Price,
        quantity: Quantity,
        session: &mut FillSession,
    ) -> Quantity {
        let mut quantity_left = quantity;

        while quantity_left.is_positive() {
            let Some(head) = self
                .side(opposing)
                .queue_at(price)
                .and_then(|queue| queue.head().cloned())
            else {
                break;
            };
            // index and queues move in lockstep, so the head id resolves
            let Some(maker) = self.orders.get(&head).cloned() else {
                debug_assert!(false, "queued id {head} missing from index");
                break;
            };

            if quantity_left < maker.quantity {
                let replacement =
                    maker.with_quantity(maker.quantity.saturating_sub(quantity_left));
                let applied = self.side_mut(opposing).update(&maker, &replacement);
                debug_assert!(applied, "index and queues out of sync for {head}");
                self.orders.insert(head, replacement.clone());

                session.notional += maker.price.as_decimal() * quantity_left.as_decimal();
                session.partial = Some(replacement);
                session.partial_quantity_processed = quantity_left;
                trace!(maker = %maker.id, %price, traded = %quantity_left, "maker partially consumed");
                quantity_left = Quantity::zero();
            } else {
                quantity_left = quantity_left.saturating_sub(maker.quantity);
                self.remove_resting(&head);

                session.notional += maker.notional();
                trace!(maker = %maker.id, %price, traded = %maker.quantity, "maker fully consumed");
                session.done.push(maker);
            }
        }

        quantity_left
    }

    /// Remove an order from the index and its side, dropping an emptied
    /// price level.
    fn remove_resting(&mut self, id: &OrderId) -> Option<Order> {
        let order = self.orders.remove(id)?;
        let removed = self.side_mut(order.side).remove(&order);
        debug_assert!(removed, "index and queues out of sync for {id}");
        Some(order)
    }

    /// Cancel a resting order. Unknown ids are a no-op.
    pub fn cancel(&mut self, id: &OrderId) -> Option<Order> {
        let order = self.remove_resting(id)?;
        debug!(order = %order.id, side = %order.side, "order canceled");
        Some(order)
    }

    /// Apply a price and/or size change to a resting order.
    ///
    /// A price change re-queues the order at the back of its new level; a
    /// size-only change keeps its queue position. Returns `Ok(None)` for
    /// unknown ids.
    pub fn modify(
        &mut self,
        id: &OrderId,
        patch: OrderPatch,
    ) -> Result<Option<Order>, OrderError> {
        let Some(current) = self.orders.get(id).cloned() else {
            return Ok(None);
        };
        if patch.side != current.side {
            return Err(OrderError::InvalidSide);
        }
        if let Some(quantity) = patch.quantity {
            if !quantity.is_positive() {
                return Err(OrderError::InvalidQuantity);
            }
        }
        if let Some(price) = patch.price {
            if !price.is_positive() {
                return Err(OrderError::InvalidPrice);
            }
        }

        let quantity = patch.quantity.unwrap_or(current.quantity);
        let updated = match patch.price {
            Some(price) if price != current.price => current
                .with_quantity(quantity)
                .with_price(price, now_nanos()),
            _ => current.with_quantity(quantity),
        };

        let applied = self.side_mut(current.side).update(&current, &updated);
        debug_assert!(applied, "index and queues out of sync for {id}");
        self.orders.insert(id.clone(), updated.clone());

        debug!(order = %id, price = %updated.price, quantity = %updated.quantity, "order modified");
        Ok(Some(updated))
    }

    /// Look up a resting order by id.
    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    /// Aggregated `(price, volume)` pairs for both sides, best to worst.
    pub fn depth(&self) -> Depth {
        Depth {
            asks: self.asks.depth(),
            bids: self.bids.depth(),
        }
    }

    /// Depth truncated to the top `levels` price levels per side.
    pub fn depth_limited(&self, levels: usize) -> Depth {
        let mut depth = self.depth();
        depth.asks.truncate(levels);
        depth.bids.truncate(levels);
        depth
    }

    /// Estimate the total notional a market order of `quantity` would pay
    /// or receive, without mutating the book.
    pub fn calculate_market_price(&self, side: Side, quantity: Quantity) -> MarketPriceEstimate {
        let opposing = self.side(side.opposite());
        let mut remaining = quantity;
        let mut total = Decimal::ZERO;

        let mut cursor = opposing.best_queue();
        while let Some(queue) = cursor {
            if !remaining.is_positive() {
                break;
            }
            let take = remaining.min(queue.volume());
            total += queue.price().as_decimal() * take.as_decimal();
            remaining = remaining.saturating_sub(take);
            cursor = opposing.worse_than(queue.price());
        }

        if remaining.is_positive() {
            MarketPriceEstimate::Partial {
                available: Price::rounded(total),
            }
        } else {
            MarketPriceEstimate::Exact(Price::rounded(total))
        }
    }

    /// True when the opposing side holds at least `quantity` of volume at
    /// prices acceptable to a limit order at `price`. Pure.
    pub fn can_fill_order(&self, side: Side, quantity: Quantity, price: Price) -> bool {
        let opposing = self.side(side.opposite());
        let mut available = Quantity::zero();

        let mut cursor = opposing.best_queue();
        while let Some(queue) = cursor {
            if !crossing::acceptable(side, price, queue.price()) {
                break;
            }
            available = available + queue.volume();
            if available >= quantity {
                return true;
            }
            cursor = opposing.worse_than(queue.price());
        }
        false
    }

    /// Best bid level as `(price, volume)`.
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.best_queue().map(|q| (q.price(), q.volume()))
    }

    /// Best ask level as `(price, volume)`.
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.best_queue().map(|q| (q.price(), q.volume()))
    }

    /// Best ask minus best bid, when both sides are populated.
    pub fn spread(&self) -> Option<Decimal> {
        let (bid, _) = self.best_bid()?;
        let (ask, _) = self.best_ask()?;
        Some(ask.as_decimal() - bid.as_decimal())
    }

    /// Midpoint of the best bid and ask, when both sides are populated.
    pub fn mid_price(&self) -> Option<Decimal> {
        let (bid, _) = self.best_bid()?;
        let (ask, _) = self.best_ask()?;
        Some((ask.as_decimal() + bid.as_decimal()) / Decimal::from(2))
    }

    /// Total number of resting orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
}
