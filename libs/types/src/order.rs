//! Order value types
//!
//! An [`Order`] is an immutable snapshot: a fill or a reprice produces a
//! replacement value rather than mutating a shared one, so the book's id
//! index and its price queues can never observe half-applied state.

use crate::errors::OrderError;
use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => write!(f, "BUY"),
            Side::SELL => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("buy") {
            Ok(Side::BUY)
        } else if s.eq_ignore_ascii_case("sell") {
            Ok(Side::SELL)
        } else {
            Err(OrderError::InvalidSide)
        }
    }
}

/// Order type tag, dispatched exhaustively at intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// Execute immediately against resting liquidity, never rests
    Market,
    /// Execute at the limit price or better, remainder may rest
    Limit,
}

impl FromStr for OrderType {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("market") {
            Ok(OrderType::Market)
        } else if s.eq_ignore_ascii_case("limit") {
            Ok(OrderType::Limit)
        } else {
            Err(OrderError::InvalidOrderType)
        }
    }
}

/// Time-in-force policy for limit orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeInForce {
    /// Good-Till-Cancel: remains until filled or explicitly canceled
    #[default]
    GTC,
    /// Immediate-Or-Cancel: match immediately, cancel remainder
    IOC,
    /// Fill-Or-Kill: full match or reject entirely
    FOK,
}

impl FromStr for TimeInForce {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("gtc") {
            Ok(TimeInForce::GTC)
        } else if s.eq_ignore_ascii_case("ioc") {
            Ok(TimeInForce::IOC)
        } else if s.eq_ignore_ascii_case("fok") {
            Ok(TimeInForce::FOK)
        } else {
            Err(OrderError::InvalidTimeInForce)
        }
    }
}

/// An order snapshot: identity, direction, remaining size, limit price,
/// and insertion time.
///
/// `quantity` is the remaining (unfilled) size. `timestamp` is Unix nanos
/// at insertion; within a price level, earlier timestamps have higher
/// time priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub quantity: Quantity,
    pub price: Price,
    pub timestamp: i64,
}

impl Order {
    /// Create a new order snapshot.
    pub fn new(id: OrderId, side: Side, quantity: Quantity, price: Price, timestamp: i64) -> Self {
        Self {
            id,
            side,
            quantity,
            price,
            timestamp,
        }
    }

    /// Replacement snapshot with a reduced (or otherwise changed) size.
    ///
    /// Identity, side, price, and timestamp are preserved, so the
    /// replacement keeps its time priority.
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self {
            id: self.id.clone(),
            quantity,
            ..*self
        }
    }

    /// Replacement snapshot at a new price.
    ///
    /// A repriced order re-enters the book at the back of its new level,
    /// so it carries a fresh insertion timestamp.
    pub fn with_price(&self, price: Price, timestamp: i64) -> Self {
        Self {
            id: self.id.clone(),
            price,
            timestamp,
            ..*self
        }
    }

    /// Notional value of the remaining size at the order's own price.
    pub fn notional(&self) -> Decimal {
        self.price.as_decimal() * self.quantity.as_decimal()
    }
}
